//! Typed multi-locus genetics: genes, genomes and per-gene mutators.
//!
//! Genes are parameterised by their allel payload type. A [`Genome`] stores
//! one type-erased pair per registered gene and recovers the concrete type on
//! lookup, which is sound because a gene id always maps to one payload type.

pub mod gene;
pub mod genome;
pub mod mutator;

pub use gene::{AnyGene, Gene, GeneId, TraitResolver};
pub use genome::{AnyGenePair, Genome, GenomeBuilder};
pub use mutator::{InheritMutator, Mutator, SpeciesMutator, StatMutator};
