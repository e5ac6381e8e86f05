//! Configuration management for the genetics simulation.
//!
//! Strongly-typed structures mapping to `agrigenome.toml`. The `[field]` and
//! `[genetics]` tables fall back to defaults key by key. The plant, mutation
//! and crop lists are taken as written; an omitted list is empty.
//!
//! ## Example `agrigenome.toml`
//!
//! ```toml
//! [field]
//! width = 9
//! height = 9
//! seed = 42
//! ticks = 200
//!
//! [genetics]
//! stat_max = 10
//! stat_mutation_chance = 0.25
//!
//! [[plants]]
//! id = "wheat"
//! seed_item = "wheat_seeds"
//! growth_stages = 8
//!
//! [[mutations]]
//! parents = ["wheat", "potato"]
//! child = "melon"
//! chance = 0.3
//!
//! [[crops]]
//! x = 4
//! y = 4
//! plant = "wheat"
//! ```

use crate::plant::PlantDefinition;
use agrigenome_data::PlantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Dimensions and pacing of the simulated field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub width: u16,
    pub height: u16,
    pub seed: Option<u64>,
    pub ticks: u64,
    /// Chance per tick that a planted, immature crop advances one stage.
    pub growth_chance: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            seed: None,
            ticks: 200,
            growth_chance: 0.2,
        }
    }
}

/// Stat bounds and stat mutation policy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneticsConfig {
    pub stat_max: u8,
    pub default_stat: u8,
    pub stat_mutation_chance: f64,
    /// Scale stat mutation chance by the parents' mutativity stat.
    pub use_mutativity: bool,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            stat_max: 10,
            default_stat: 5,
            stat_mutation_chance: 0.25,
            use_mutativity: true,
        }
    }
}

/// A species mutation recipe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MutationConfig {
    pub parents: [PlantId; 2],
    pub child: PlantId,
    pub chance: f64,
}

/// A crop planted when the field is created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CropConfig {
    pub x: u16,
    pub y: u16,
    pub plant: PlantId,
    /// Initial growth stage; defaults to mature.
    #[serde(default)]
    pub stage: Option<u8>,
    #[serde(default = "default_true")]
    pub fertile: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub genetics: GeneticsConfig,
    #[serde(default)]
    pub plants: Vec<PlantDefinition>,
    #[serde(default)]
    pub mutations: Vec<MutationConfig>,
    #[serde(default)]
    pub crops: Vec<CropConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let plant = |id: &str| PlantId::new(id);
        let crop = |x, y, id: &str| CropConfig {
            x,
            y,
            plant: plant(id),
            stage: None,
            fertile: true,
        };
        Self {
            field: FieldConfig::default(),
            genetics: GeneticsConfig::default(),
            plants: vec![
                PlantDefinition::new("wheat", 8),
                PlantDefinition::new("carrot", 8),
                PlantDefinition::new("potato", 8).with_cloning(7, 0.3),
                PlantDefinition::new("beetroot", 4),
                PlantDefinition::new("melon", 8).with_cloning(7, 0.1),
            ],
            mutations: vec![
                MutationConfig {
                    parents: [plant("carrot"), plant("potato")],
                    child: plant("beetroot"),
                    chance: 0.4,
                },
                MutationConfig {
                    parents: [plant("wheat"), plant("beetroot")],
                    child: plant("melon"),
                    chance: 0.25,
                },
            ],
            crops: vec![
                crop(2, 2, "wheat"),
                crop(4, 2, "carrot"),
                crop(6, 2, "potato"),
                crop(2, 6, "potato"),
                crop(4, 6, "carrot"),
                crop(6, 6, "wheat"),
            ],
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Field validation
        anyhow::ensure!(self.field.width > 0, "Field width must be positive");
        anyhow::ensure!(self.field.width <= 1000, "Field width too large (max 1000)");
        anyhow::ensure!(self.field.height > 0, "Field height must be positive");
        anyhow::ensure!(
            self.field.height <= 1000,
            "Field height too large (max 1000)"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.field.growth_chance),
            "Growth chance must be in [0.0, 1.0]"
        );

        // Genetics validation
        anyhow::ensure!(self.genetics.stat_max > 0, "Stat max must be positive");
        anyhow::ensure!(
            self.genetics.default_stat <= self.genetics.stat_max,
            "Default stat must not exceed stat max"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.genetics.stat_mutation_chance),
            "Stat mutation chance must be in [0.0, 1.0]"
        );

        // Plant validation
        let mut ids = HashSet::new();
        let mut seeds = HashSet::new();
        for plant in &self.plants {
            anyhow::ensure!(
                plant.id.as_str() != agrigenome_data::NO_PLANT_ID,
                "Plant id `{}` is reserved",
                plant.id
            );
            anyhow::ensure!(ids.insert(&plant.id), "Duplicate plant `{}`", plant.id);
            anyhow::ensure!(
                seeds.insert(plant.seed_item.as_str()),
                "Duplicate seed item `{}`",
                plant.seed_item
            );
            anyhow::ensure!(
                plant.growth_stages > 0,
                "Plant `{}` needs at least one growth stage",
                plant.id
            );
            anyhow::ensure!(
                (0.0..=1.0).contains(&plant.spread_chance),
                "Spread chance of `{}` must be in [0.0, 1.0]",
                plant.id
            );
        }

        // Mutation validation
        for mutation in &self.mutations {
            for id in mutation.parents.iter().chain(std::iter::once(&mutation.child)) {
                anyhow::ensure!(ids.contains(id), "Mutation references unknown plant `{id}`");
            }
            anyhow::ensure!(
                (0.0..=1.0).contains(&mutation.chance),
                "Mutation chance must be in [0.0, 1.0]"
            );
        }

        // Crop validation
        for crop in &self.crops {
            anyhow::ensure!(
                ids.contains(&crop.plant),
                "Crop references unknown plant `{}`",
                crop.plant
            );
            anyhow::ensure!(
                crop.x < self.field.width && crop.y < self.field.height,
                "Crop at ({}, {}) lies outside the field",
                crop.x,
                crop.y
            );
        }

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.plants).as_bytes());
        hasher.update(format!("{:?}", self.mutations).as_bytes());
        hex::encode(hasher.finalize())
    }
}
