//! The per-tick mutation engine.
//!
//! Each call looks at one target slot and its neighbours and decides whether
//! a descendant appears on the target:
//!
//! - no eligible parent: nothing happens
//! - one parent: the parent may spread a clone, gated by its plant
//! - two or more: the two best-ranked parents are crossed
//!
//! Selection, cloning and combination are independent strategies that can be
//! swapped at runtime.

pub mod clone;
pub mod combine;
pub mod selector;

pub use clone::{CloneLogic, StructuralClone};
pub use combine::{CombineLogic, GeneticCombiner};
pub use selector::{FertilitySelector, ParentSelector};

use crate::crop::Crop;
use crate::error::{GeneticsError, Result};
use crate::genetics::Genome;
use crate::plant::PlantRef;
use crate::registry::MutationContext;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Orchestrates selection, cloning and combination.
///
/// Holds no genetic state of its own; strategies are shared handles.
#[derive(Clone)]
pub struct MutationEngine {
    selector: Arc<dyn ParentSelector>,
    cloner: Arc<dyn CloneLogic>,
    combiner: Arc<dyn CombineLogic>,
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selector: Arc::new(FertilitySelector),
            cloner: Arc::new(StructuralClone),
            combiner: Arc::new(GeneticCombiner),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &Arc<dyn ParentSelector> {
        &self.selector
    }

    #[must_use]
    pub fn cloner(&self) -> &Arc<dyn CloneLogic> {
        &self.cloner
    }

    #[must_use]
    pub fn combiner(&self) -> &Arc<dyn CombineLogic> {
        &self.combiner
    }

    pub fn set_selection_logic(&mut self, selector: Arc<dyn ParentSelector>) -> &mut Self {
        self.selector = selector;
        self
    }

    pub fn set_clone_logic(&mut self, cloner: Arc<dyn CloneLogic>) -> &mut Self {
        self.cloner = cloner;
        self
    }

    pub fn set_combine_logic(&mut self, combiner: Arc<dyn CombineLogic>) -> &mut Self {
        self.combiner = combiner;
        self
    }

    /// Restores the default strategies.
    pub fn reset_defaults(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Runs one mutation tick for `target`.
    ///
    /// Returns the descendant's species when one was spawned onto `target`.
    /// `Ok(None)` is the common, silent outcome. Errors only surface when a
    /// collaborator broke the genome contract.
    pub fn handle_tick<'a, I>(
        &self,
        ctx: &MutationContext<'_>,
        target: &mut dyn Crop,
        neighbours: I,
        rng: &mut dyn RngCore,
    ) -> Result<Option<PlantRef>>
    where
        I: IntoIterator<Item = &'a dyn Crop>,
    {
        let mut neighbours = neighbours.into_iter();
        let candidates = self
            .selector
            .select_and_order(&mut neighbours, ctx, &mut *rng);

        match candidates.as_slice() {
            [] => {
                tracing::trace!("No eligible parents");
                Ok(None)
            }
            [parent] => self.do_clone(ctx, target, *parent, rng),
            [first, second, ..] => self
                .do_combine(ctx, target, *first, *second, rng)
                .map(Some),
        }
    }

    fn do_clone(
        &self,
        ctx: &MutationContext<'_>,
        target: &mut dyn Crop,
        parent: &dyn Crop,
        rng: &mut dyn RngCore,
    ) -> Result<Option<PlantRef>> {
        let plant = parent.plant().clone();
        let stage = parent.growth_stage();
        if !plant.allows_cloning(stage) {
            tracing::trace!(plant = %plant.id(), "Cloning not allowed");
            return Ok(None);
        }
        if rng.gen::<f64>() >= plant.spread_chance(stage) {
            tracing::trace!(plant = %plant.id(), "Spread roll failed");
            return Ok(None);
        }
        let genome = parent.genome().ok_or(GeneticsError::MissingGenome)?;
        let genome = self.cloner.clone_genome(genome, ctx, rng)?;
        Ok(Some(spawn_child(target, plant, genome)))
    }

    fn do_combine(
        &self,
        ctx: &MutationContext<'_>,
        target: &mut dyn Crop,
        first: &dyn Crop,
        second: &dyn Crop,
        rng: &mut dyn RngCore,
    ) -> Result<PlantRef> {
        let a = first.genome().ok_or(GeneticsError::MissingGenome)?;
        let b = second.genome().ok_or(GeneticsError::MissingGenome)?;
        let genome = self.combiner.combine((a, b), ctx, rng)?;
        let plant = genome.species(ctx.genes)?;
        Ok(spawn_child(target, plant, genome))
    }
}

fn spawn_child(target: &mut dyn Crop, plant: PlantRef, genome: Genome) -> PlantRef {
    tracing::debug!(plant = %plant.id(), "Spawned descendant");
    target.set_cross_crop(false);
    target.set_plant(plant.clone());
    target.set_genome(genome);
    plant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::CropState;
    use crate::genetics::{Gene, InheritMutator};
    use crate::plant::PlantDefinition;
    use crate::registry::{GeneRegistry, StatRegistry};
    use agrigenome_data::data::stat::FERTILITY;
    use agrigenome_data::{Allel, GenePair, GrowthStage, StatId};
    use rand::rngs::mock::StepRng;

    struct Fixture {
        genes: GeneRegistry,
        stats: StatRegistry,
        fertility: Arc<Gene<u8>>,
    }

    impl Fixture {
        fn new() -> Self {
            let stats = StatRegistry::standard(10).unwrap();
            let mut genes = GeneRegistry::new(Arc::new(InheritMutator));
            let fertility = genes
                .register(Gene::new(FERTILITY, 10u8, Arc::new(InheritMutator)))
                .unwrap();
            Self {
                genes,
                stats,
                fertility,
            }
        }

        fn ctx(&self) -> MutationContext<'_> {
            MutationContext::new(&self.genes, &self.stats)
        }

        fn crop(&self, plant: PlantDefinition, fertility: u8) -> CropState {
            let plant = PlantRef::new(plant);
            let mut builder = crate::genetics::GenomeBuilder::new(&self.genes, plant.clone());
            builder
                .set(
                    self.fertility.as_ref(),
                    GenePair::homozygous(Allel::new("fertility", fertility)),
                )
                .unwrap();
            let total = u8::try_from(plant.growth_stages().len()).unwrap();
            CropState::planted(plant, builder.build().unwrap(), GrowthStage::last(total))
        }
    }

    #[test]
    fn test_no_neighbours_is_noop() {
        let fx = Fixture::new();
        let engine = MutationEngine::new();
        let mut target = CropState::cross();
        let mut rng = StepRng::new(0, 0);
        let result = engine
            .handle_tick(&fx.ctx(), &mut target, std::iter::empty::<&dyn Crop>(), &mut rng)
            .unwrap();
        assert!(result.is_none());
        assert!(target.genome.is_none());
        assert!(target.cross_crop);
    }

    #[test]
    fn test_clone_disallowed_never_spawns() {
        let fx = Fixture::new();
        let engine = MutationEngine::new();
        let parent = fx.crop(PlantDefinition::new("wheat", 4), 10);
        let mut target = CropState::cross();
        let mut rng = StepRng::new(0, 0);
        let result = engine
            .handle_tick(&fx.ctx(), &mut target, [&parent as &dyn Crop], &mut rng)
            .unwrap();
        assert!(result.is_none());
        assert!(!target.is_planted());
    }

    #[test]
    fn test_clone_spawns_copy() {
        let fx = Fixture::new();
        let engine = MutationEngine::new();
        let parent = fx.crop(PlantDefinition::new("potato", 4).with_cloning(0, 0.5), 10);
        let mut target = CropState::cross();
        let mut rng = StepRng::new(0, 0);
        let result = engine
            .handle_tick(&fx.ctx(), &mut target, [&parent as &dyn Crop], &mut rng)
            .unwrap();
        assert_eq!(result.unwrap().id().as_str(), "potato");
        assert_eq!(target.genome, parent.genome);
        assert!(!target.cross_crop);
        assert_eq!(target.stat(fx.stats.fertility()), 10);
        assert_eq!(
            target.genome().unwrap().stat_value(&StatId::new(FERTILITY)),
            Some(10)
        );
    }

    #[test]
    fn test_reset_defaults_restores_strategies() {
        struct NeverSelect;
        impl ParentSelector for NeverSelect {
            fn select_and_order<'a>(
                &self,
                _neighbours: &mut dyn Iterator<Item = &'a dyn Crop>,
                _ctx: &MutationContext<'_>,
                _rng: &mut dyn RngCore,
            ) -> Vec<&'a dyn Crop> {
                Vec::new()
            }
        }

        let fx = Fixture::new();
        let a = fx.crop(PlantDefinition::new("wheat", 4), 10);
        let b = fx.crop(PlantDefinition::new("carrot", 4), 10);
        let mut engine = MutationEngine::new();
        engine.set_selection_logic(Arc::new(NeverSelect));

        let mut target = CropState::cross();
        let mut rng = StepRng::new(0, 0);
        let neighbours = [&a as &dyn Crop, &b as &dyn Crop];
        assert!(engine
            .handle_tick(&fx.ctx(), &mut target, neighbours, &mut rng)
            .unwrap()
            .is_none());

        engine.reset_defaults();
        let spawned = engine
            .handle_tick(&fx.ctx(), &mut target, neighbours, &mut rng)
            .unwrap();
        assert_eq!(spawned.unwrap().id().as_str(), "wheat");
    }
}
