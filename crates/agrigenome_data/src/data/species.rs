use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the sentinel "no plant" species.
pub const NO_PLANT_ID: &str = "none";

/// Registry key of a plant species.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub String);

impl PlantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn none() -> Self {
        Self(NO_PLANT_ID.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Seed item as handed over by inventory collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    pub item: String,
}

impl Seed {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}
