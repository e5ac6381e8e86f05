use crate::error::Result;
use crate::genetics::Genome;
use crate::registry::MutationContext;
use rand::RngCore;

/// Produces the genome of a descendant spread from a single parent.
pub trait CloneLogic: Send + Sync {
    fn clone_genome(
        &self,
        parent: &Genome,
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Genome>;
}

/// Exact copy of the parent. Draws no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralClone;

impl CloneLogic for StructuralClone {
    fn clone_genome(
        &self,
        parent: &Genome,
        _ctx: &MutationContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<Genome> {
        Ok(parent.clone())
    }
}
