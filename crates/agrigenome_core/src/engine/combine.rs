use crate::error::Result;
use crate::genetics::{Genome, GenomeBuilder};
use crate::registry::MutationContext;
use rand::RngCore;

/// Produces the genome of a descendant of two parents.
pub trait CombineLogic: Send + Sync {
    fn combine(
        &self,
        parents: (&Genome, &Genome),
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Genome>;
}

/// Runs every registered gene's mutator over the two parents.
///
/// The builder is seeded with the first parent's species; the species gene's
/// own mutator then decides the final species like any other gene.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneticCombiner;

impl CombineLogic for GeneticCombiner {
    fn combine(
        &self,
        parents: (&Genome, &Genome),
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Genome> {
        let species = parents.0.species(ctx.genes)?;
        let mut builder = GenomeBuilder::new(ctx.genes, species);
        builder.populate(|gene| gene.mutate(parents, &mut *rng))?;
        builder.build()
    }
}
