use crate::error::RegistryError;
use crate::plant::PlantRef;
use agrigenome_data::{GrowthStage, PlantId, Seed};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Deduplicated plant registry.
///
/// The "no plant" sentinel is registered on construction and can never be
/// removed. Adding a plant also records its growth stages.
#[derive(Debug, Clone)]
pub struct PlantRegistry {
    plants: BTreeMap<PlantId, PlantRef>,
    seeds: HashMap<String, PlantId>,
    growth_stages: BTreeSet<GrowthStage>,
    no_plant: PlantRef,
}

impl Default for PlantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantRegistry {
    /// A registry holding only the empty-slot sentinel.
    #[must_use]
    pub fn new() -> Self {
        let no_plant = PlantRef::none();
        let mut registry = Self {
            plants: BTreeMap::new(),
            seeds: HashMap::new(),
            growth_stages: BTreeSet::new(),
            no_plant: no_plant.clone(),
        };
        registry.insert(no_plant);
        registry
    }

    /// Registers `plant` exactly once. Ids and seed items must both be unique.
    pub fn add(&mut self, plant: PlantRef) -> Result<(), RegistryError> {
        if self.plants.contains_key(plant.id()) {
            return Err(RegistryError::duplicate("plant", plant.id().as_str()));
        }
        if self.seeds.contains_key(plant.seed_item()) {
            return Err(RegistryError::duplicate("seed", plant.seed_item()));
        }
        tracing::debug!(plant = %plant.id(), seed = plant.seed_item(), "Registered plant");
        self.insert(plant);
        Ok(())
    }

    fn insert(&mut self, plant: PlantRef) {
        if plant.is_plant() && !plant.seed_item().is_empty() {
            self.seeds
                .insert(plant.seed_item().to_string(), plant.id().clone());
        }
        self.growth_stages.extend(plant.growth_stages());
        self.plants.insert(plant.id().clone(), plant);
    }

    /// Removes a plant. The sentinel is protected.
    pub fn remove(&mut self, id: &PlantId) -> Result<PlantRef, RegistryError> {
        if id == self.no_plant.id() {
            return Err(RegistryError::protected("plant", id.as_str()));
        }
        let plant = self
            .plants
            .remove(id)
            .ok_or_else(|| RegistryError::not_found("plant", id.as_str()))?;
        self.seeds.remove(plant.seed_item());
        Ok(plant)
    }

    /// Whether `id` names a registered plant.
    #[must_use]
    pub fn has_plant(&self, id: &PlantId) -> bool {
        self.plants.contains_key(id)
    }

    /// Whether some plant grows from `seed`.
    #[must_use]
    pub fn is_seed(&self, seed: &Seed) -> bool {
        self.seeds.contains_key(&seed.item)
    }

    /// Looks up a plant by id.
    #[must_use]
    pub fn get(&self, id: &PlantId) -> Option<&PlantRef> {
        self.plants.get(id)
    }

    /// The plant that grows from `seed`.
    #[must_use]
    pub fn from_seed(&self, seed: &Seed) -> Option<&PlantRef> {
        self.seeds.get(&seed.item).and_then(|id| self.plants.get(id))
    }

    /// The empty-slot sentinel.
    #[must_use]
    pub fn no_plant(&self) -> &PlantRef {
        &self.no_plant
    }

    /// All registered plants, sentinel included, ordered by id.
    pub fn plants(&self) -> impl Iterator<Item = &PlantRef> {
        self.plants.values()
    }

    /// Registered ids, sentinel included, ordered by id.
    pub fn plant_ids(&self) -> impl Iterator<Item = &PlantId> {
        self.plants.keys()
    }

    /// Every growth stage used by any registered plant.
    #[must_use]
    pub fn growth_stages(&self) -> &BTreeSet<GrowthStage> {
        &self.growth_stages
    }

    /// Number of registered plants, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether the registry is empty. The sentinel makes this false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}
