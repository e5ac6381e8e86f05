use agrigenome_lib::model::config::{AppConfig, MutationConfig};
use agrigenome_lib::model::data::{Allel, GenePair, GrowthStage, PlantId, Stat, StatId};
use agrigenome_lib::model::genetics::{GeneId, Genome, GenomeBuilder};
use agrigenome_lib::model::plant::{PlantDefinition, PlantRef};
use agrigenome_lib::model::{Crop, CropState, Genetics};
use rand::RngCore;
use std::collections::VecDeque;

/// Four plants, no stat drift, and a certain carrot + potato recipe.
#[allow(dead_code)]
pub fn lab_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.genetics.stat_mutation_chance = 0.0;
    config.plants = vec![
        PlantDefinition::new("wheat", 4),
        PlantDefinition::new("carrot", 4),
        PlantDefinition::new("potato", 4).with_cloning(0, 1.0),
        PlantDefinition::new("beetroot", 3),
        PlantDefinition::new("reed", 4).with_cloning(0, 0.0),
    ];
    config.mutations = vec![MutationConfig {
        parents: [PlantId::new("carrot"), PlantId::new("potato")],
        child: PlantId::new("beetroot"),
        chance: 1.0,
    }];
    config.crops = Vec::new();
    config
}

#[allow(dead_code)]
pub fn lab() -> Genetics {
    Genetics::from_config(&lab_config()).unwrap()
}

#[allow(dead_code)]
pub fn plant(genetics: &Genetics, id: &str) -> PlantRef {
    genetics.plants.get(&PlantId::new(id)).unwrap().clone()
}

/// A mature, fertile crop whose listed stats are homozygous.
#[allow(dead_code)]
pub fn with_stats(genetics: &Genetics, id: &str, stats: &[(&str, u8)]) -> CropState {
    let plant = plant(genetics, id);
    let mut builder = GenomeBuilder::new(&genetics.genes, plant.clone());
    for &(stat, value) in stats {
        let gene = genetics.genes.get::<u8>(&GeneId::new(stat)).unwrap();
        builder
            .set(gene, GenePair::homozygous(Allel::new(format!("{stat}:{value}"), value)))
            .unwrap();
    }
    builder.fill_defaults();
    let total = u8::try_from(plant.growth_stages().len()).unwrap();
    CropState::planted(plant, builder.build().unwrap(), GrowthStage::last(total))
}

#[allow(dead_code)]
pub fn mature(genetics: &Genetics, id: &str, fertility: u8) -> CropState {
    with_stats(genetics, id, &[("fertility", fertility)])
}

/// A crop whose capability flags are set directly, independent of any genome.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct StubCrop {
    pub valid: bool,
    pub mature: bool,
    pub fertile: bool,
    pub fertility: u8,
    plant: PlantRef,
}

#[allow(dead_code)]
impl StubCrop {
    pub fn new(valid: bool, mature: bool, fertile: bool, fertility: u8) -> Self {
        Self {
            valid,
            mature,
            fertile,
            fertility,
            plant: PlantRef::new(PlantDefinition::new("stub", 1)),
        }
    }

    /// Valid, mature and fertile.
    pub fn eligible(fertility: u8) -> Self {
        Self::new(true, true, true, fertility)
    }
}

impl Crop for StubCrop {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_mature(&self) -> bool {
        self.mature
    }

    fn is_fertile(&self) -> bool {
        self.fertile
    }

    fn growth_stage(&self) -> GrowthStage {
        if self.mature {
            GrowthStage::last(1)
        } else {
            GrowthStage::first(2)
        }
    }

    fn stat(&self, stat: &Stat) -> u8 {
        if stat.id == StatId::new("fertility") {
            stat.clamp(self.fertility)
        } else {
            0
        }
    }

    fn genome(&self) -> Option<&Genome> {
        None
    }

    fn plant(&self) -> &PlantRef {
        &self.plant
    }

    fn set_cross_crop(&mut self, _cross: bool) {}

    fn set_plant(&mut self, plant: PlantRef) {
        self.plant = plant;
    }

    fn set_genome(&mut self, _genome: Genome) {}
}

/// Replays a fixed sequence of `u32` draws, then panics.
#[allow(dead_code)]
pub struct ScriptedRng {
    draws: VecDeque<u32>,
}

#[allow(dead_code)]
impl ScriptedRng {
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draws.pop_front().expect("scripted draws exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
