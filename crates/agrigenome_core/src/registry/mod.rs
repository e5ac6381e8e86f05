//! Explicit registries handed to the engine instead of process-wide globals.
//!
//! All of them are filled during setup and only read while ticks run.

pub mod gene;
pub mod mutation;
pub mod plant;
pub mod stat;

pub use gene::{GeneRegistry, SPECIES_GENE};
pub use mutation::{MutationRecipe, MutationRegistry};
pub use plant::PlantRegistry;
pub use stat::StatRegistry;

/// Read-only registries every strategy call receives.
#[derive(Clone, Copy)]
pub struct MutationContext<'a> {
    pub genes: &'a GeneRegistry,
    pub stats: &'a StatRegistry,
}

impl<'a> MutationContext<'a> {
    /// Borrows the registries a tick reads from.
    #[must_use]
    pub fn new(genes: &'a GeneRegistry, stats: &'a StatRegistry) -> Self {
        Self { genes, stats }
    }
}
