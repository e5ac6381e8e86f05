//! Plain genetic data shared by the engine and its collaborators.

pub mod data;

pub use data::allel::{Allel, AllelValue};
pub use data::gene_pair::GenePair;
pub use data::growth::GrowthStage;
pub use data::species::{PlantId, Seed, NO_PLANT_ID};
pub use data::stat::{Stat, StatId};
