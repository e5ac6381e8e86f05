//! The crop entity capability consumed by the engine.

use crate::genetics::Genome;
use crate::plant::PlantRef;
use agrigenome_data::{GrowthStage, Stat};

/// A living crop instance as seen by the genetics engine.
///
/// Parents are only read; the target of a tick is written through the
/// `set_*` methods once a descendant has been decided.
pub trait Crop {
    fn is_valid(&self) -> bool;
    fn is_mature(&self) -> bool;
    fn is_fertile(&self) -> bool;
    fn growth_stage(&self) -> GrowthStage;
    fn stat(&self, stat: &Stat) -> u8;
    fn genome(&self) -> Option<&Genome>;
    fn plant(&self) -> &PlantRef;

    fn set_cross_crop(&mut self, cross: bool);
    fn set_plant(&mut self, plant: PlantRef);
    fn set_genome(&mut self, genome: Genome);
}

/// Plain crop state used by the field driver and tests.
#[derive(Debug, Clone)]
pub struct CropState {
    pub plant: PlantRef,
    pub genome: Option<Genome>,
    pub growth: GrowthStage,
    pub cross_crop: bool,
    pub fertile: bool,
}

impl Default for CropState {
    fn default() -> Self {
        Self::empty()
    }
}

impl CropState {
    /// An unplanted slot.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            plant: PlantRef::none(),
            genome: None,
            growth: GrowthStage::first(1),
            cross_crop: false,
            fertile: true,
        }
    }

    /// An empty cross-crop slot, waiting for a descendant.
    #[must_use]
    pub fn cross() -> Self {
        Self {
            cross_crop: true,
            ..Self::empty()
        }
    }

    #[must_use]
    pub fn planted(plant: PlantRef, genome: Genome, growth: GrowthStage) -> Self {
        Self {
            plant,
            genome: Some(genome),
            growth,
            cross_crop: false,
            fertile: true,
        }
    }

    #[must_use]
    pub fn with_fertile(mut self, fertile: bool) -> Self {
        self.fertile = fertile;
        self
    }

    #[must_use]
    pub fn is_planted(&self) -> bool {
        self.plant.is_plant()
    }

    /// Advances one growth stage; returns false when already mature.
    pub fn grow(&mut self) -> bool {
        match self.growth.next() {
            Some(next) => {
                self.growth = next;
                true
            }
            None => false,
        }
    }
}

impl Crop for CropState {
    fn is_valid(&self) -> bool {
        self.plant.is_plant() && self.genome.is_some()
    }

    fn is_mature(&self) -> bool {
        self.growth.is_mature()
    }

    fn is_fertile(&self) -> bool {
        self.fertile
    }

    fn growth_stage(&self) -> GrowthStage {
        self.growth
    }

    fn stat(&self, stat: &Stat) -> u8 {
        self.genome
            .as_ref()
            .and_then(|genome| genome.stat_value(&stat.id))
            .map_or(0, |value| stat.clamp(value))
    }

    fn genome(&self) -> Option<&Genome> {
        self.genome.as_ref()
    }

    fn plant(&self) -> &PlantRef {
        &self.plant
    }

    fn set_cross_crop(&mut self, cross: bool) {
        self.cross_crop = cross;
    }

    /// A freshly spawned plant starts its own cycle from the first stage.
    fn set_plant(&mut self, plant: PlantRef) {
        let stages = u8::try_from(plant.growth_stages().len()).unwrap_or(u8::MAX);
        self.growth = GrowthStage::first(stages);
        self.plant = plant;
    }

    fn set_genome(&mut self, genome: Genome) {
        self.genome = Some(genome);
    }
}
