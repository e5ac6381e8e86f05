//! Core data structures for the genetics engine.

pub mod allel;
pub mod gene_pair;
pub mod growth;
pub mod species;
pub mod stat;
