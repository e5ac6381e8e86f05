//! Plant species as seen by the genetics engine.

use agrigenome_data::{AllelValue, GrowthStage, PlantId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Behaviour the engine needs from a plant species.
pub trait Plant: Send + Sync {
    fn id(&self) -> &PlantId;

    /// Item identifier of this plant's seed.
    fn seed_item(&self) -> &str;

    fn growth_stages(&self) -> Vec<GrowthStage>;

    fn allows_cloning(&self, stage: GrowthStage) -> bool;

    /// Probability in `[0, 1)` that a lone parent spreads onto a neighbour.
    fn spread_chance(&self, stage: GrowthStage) -> f64;

    /// False only for the "no plant" sentinel.
    fn is_plant(&self) -> bool {
        true
    }
}

/// Shared handle to a plant species. Two handles are equal when their ids are.
#[derive(Clone)]
pub struct PlantRef(Arc<dyn Plant>);

impl PlantRef {
    pub fn new<P: Plant + 'static>(plant: P) -> Self {
        Self(Arc::new(plant))
    }

    #[must_use]
    pub fn none() -> Self {
        Self::new(NoPlant::default())
    }
}

impl Deref for PlantRef {
    type Target = dyn Plant;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for PlantRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PlantRef {}

impl fmt::Debug for PlantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlantRef({})", self.id())
    }
}

/// Species allels are codominant: the allel inherited first is expressed.
impl AllelValue for PlantRef {}

/// The sentinel occupying empty crop slots.
#[derive(Debug)]
pub struct NoPlant {
    id: PlantId,
}

impl Default for NoPlant {
    fn default() -> Self {
        Self { id: PlantId::none() }
    }
}

impl Plant for NoPlant {
    fn id(&self) -> &PlantId {
        &self.id
    }

    fn seed_item(&self) -> &str {
        ""
    }

    fn growth_stages(&self) -> Vec<GrowthStage> {
        vec![GrowthStage::first(1)]
    }

    fn allows_cloning(&self, _stage: GrowthStage) -> bool {
        false
    }

    fn spread_chance(&self, _stage: GrowthStage) -> f64 {
        0.0
    }

    fn is_plant(&self) -> bool {
        false
    }
}

/// Data-driven plant species, loaded from `[[plants]]` config entries.
///
/// Cloning is allowed from `clone_from_stage` onwards; the spread chance
/// grows with the parent's progress through its cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlantDefinition {
    pub id: PlantId,
    pub seed_item: String,
    pub growth_stages: u8,
    #[serde(default)]
    pub clone_from_stage: Option<u8>,
    #[serde(default)]
    pub spread_chance: f64,
}

impl PlantDefinition {
    pub fn new(id: &str, growth_stages: u8) -> Self {
        Self {
            id: PlantId::new(id),
            seed_item: format!("{id}_seeds"),
            growth_stages,
            clone_from_stage: None,
            spread_chance: 0.0,
        }
    }

    #[must_use]
    pub fn with_cloning(mut self, from_stage: u8, spread_chance: f64) -> Self {
        self.clone_from_stage = Some(from_stage);
        self.spread_chance = spread_chance;
        self
    }
}

impl Plant for PlantDefinition {
    fn id(&self) -> &PlantId {
        &self.id
    }

    fn seed_item(&self) -> &str {
        &self.seed_item
    }

    fn growth_stages(&self) -> Vec<GrowthStage> {
        let total = self.growth_stages.max(1);
        (0..total).map(|i| GrowthStage::new(i, total)).collect()
    }

    fn allows_cloning(&self, stage: GrowthStage) -> bool {
        self.clone_from_stage
            .is_some_and(|from| stage.index >= from)
    }

    fn spread_chance(&self, stage: GrowthStage) -> f64 {
        (self.spread_chance * stage.progress()).clamp(0.0, 1.0)
    }
}
