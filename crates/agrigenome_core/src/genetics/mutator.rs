use super::gene::{Gene, GeneId};
use super::genome::Genome;
use crate::error::Result;
use crate::plant::PlantRef;
use crate::registry::MutationRegistry;
use agrigenome_data::{Allel, AllelValue, GenePair};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Per-gene inheritance policy.
///
/// Receives one candidate allel from each parent (already drawn by coin flip)
/// plus both complete parent genomes, so a policy may consult other genes.
pub trait Mutator<T: AllelValue>: Send + Sync {
    fn pick_or_mutate(
        &self,
        gene: &Gene<T>,
        first: &Allel<T>,
        second: &Allel<T>,
        parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<GenePair<T>>;
}

/// Passes both candidates on unchanged, ordered by dominance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritMutator;

impl<T: AllelValue> Mutator<T> for InheritMutator {
    fn pick_or_mutate(
        &self,
        _gene: &Gene<T>,
        first: &Allel<T>,
        second: &Allel<T>,
        _parents: (&Genome, &Genome),
        _rng: &mut dyn RngCore,
    ) -> Result<GenePair<T>> {
        Ok(GenePair::from_allels(first.clone(), second.clone()))
    }
}

/// Point mutation for stat genes.
///
/// With probability `base_chance` (scaled by the parents' mean mutativity
/// when a mutativity gene is configured) one candidate is replaced by a new
/// allel one step above or below it, clamped to `[0, max]`.
#[derive(Debug, Clone)]
pub struct StatMutator {
    max: u8,
    base_chance: f64,
    mutativity: Option<GeneId>,
}

impl StatMutator {
    #[must_use]
    pub fn new(max: u8, base_chance: f64) -> Self {
        Self {
            max,
            base_chance: base_chance.clamp(0.0, 1.0),
            mutativity: None,
        }
    }

    #[must_use]
    pub fn with_mutativity(mut self, gene: GeneId) -> Self {
        self.mutativity = Some(gene);
        self
    }

    /// Effective mutation chance for these parents.
    pub fn chance(&self, parents: (&Genome, &Genome)) -> Result<f64> {
        let Some(id) = &self.mutativity else {
            return Ok(self.base_chance);
        };
        let a = parents.0.trait_by_id::<u8>(id)?;
        let b = parents.1.trait_by_id::<u8>(id)?;
        let mean = (f64::from(a) + f64::from(b)) / 2.0;
        Ok((self.base_chance * mean / f64::from(self.max.max(1))).clamp(0.0, 1.0))
    }
}

impl Mutator<u8> for StatMutator {
    fn pick_or_mutate(
        &self,
        gene: &Gene<u8>,
        first: &Allel<u8>,
        second: &Allel<u8>,
        parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<GenePair<u8>> {
        let chance = self.chance(parents)?;
        if chance <= 0.0 || !rng.gen_bool(chance) {
            return Ok(GenePair::from_allels(first.clone(), second.clone()));
        }

        let mutate_first = rng.gen_bool(0.5);
        let source = if mutate_first {
            *first.value()
        } else {
            *second.value()
        };
        let value = if rng.gen_bool(0.5) {
            source.saturating_add(1).min(self.max)
        } else {
            source.saturating_sub(1)
        };
        let mutated = Allel::new(format!("{}:{value}", gene.id()), value);
        tracing::trace!(gene = %gene.id(), from = source, to = value, "Stat mutation");

        Ok(if mutate_first {
            GenePair::from_allels(mutated, second.clone())
        } else {
            GenePair::from_allels(first.clone(), mutated)
        })
    }
}

/// Species policy driven by registered mutation recipes.
///
/// Every recipe matching the two candidate species gets one roll against its
/// chance, in registration order. The first success yields a homozygous pair
/// of the recipe's child; otherwise both candidates are inherited.
#[derive(Clone)]
pub struct SpeciesMutator {
    mutations: Arc<MutationRegistry>,
}

impl SpeciesMutator {
    #[must_use]
    pub fn new(mutations: Arc<MutationRegistry>) -> Self {
        Self { mutations }
    }
}

impl Mutator<PlantRef> for SpeciesMutator {
    fn pick_or_mutate(
        &self,
        _gene: &Gene<PlantRef>,
        first: &Allel<PlantRef>,
        second: &Allel<PlantRef>,
        _parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<GenePair<PlantRef>> {
        for recipe in self.mutations.matching(first.value().id(), second.value().id()) {
            if rng.gen::<f64>() < recipe.chance {
                tracing::debug!(
                    first = %first.value().id(),
                    second = %second.value().id(),
                    child = %recipe.child.id(),
                    "Species mutation"
                );
                let child = Allel::new(recipe.child.id().to_string(), recipe.child.clone());
                return Ok(GenePair::homozygous(child));
            }
        }
        Ok(GenePair::from_allels(first.clone(), second.clone()))
    }
}
