//! Builds the registries described by an [`AppConfig`].

use crate::config::AppConfig;
use crate::error::Result;
use crate::genetics::Genome;
use crate::plant::PlantRef;
use crate::registry::{
    GeneRegistry, MutationContext, MutationRecipe, MutationRegistry, PlantRegistry, StatRegistry,
};
use anyhow::Context;
use std::sync::Arc;

/// Every registry a simulation needs, wired together.
pub struct Genetics {
    pub plants: PlantRegistry,
    pub stats: StatRegistry,
    pub mutations: Arc<MutationRegistry>,
    pub genes: GeneRegistry,
}

impl Genetics {
    /// Registers the configured plants, the standard stats, the recipes and
    /// one gene per stat.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let mut plants = PlantRegistry::new();
        for definition in &config.plants {
            plants.add(PlantRef::new(definition.clone()))?;
        }

        let stats = StatRegistry::standard(config.genetics.stat_max)?;

        let mut mutations = MutationRegistry::new();
        for mutation in &config.mutations {
            let child = plants
                .get(&mutation.child)
                .with_context(|| format!("Unknown mutation child `{}`", mutation.child))?;
            let [first, second] = mutation.parents.clone();
            mutations.add(MutationRecipe::new(
                first,
                second,
                child.clone(),
                mutation.chance,
            ))?;
        }
        let mutations = Arc::new(mutations);

        let genes = GeneRegistry::standard(&stats, mutations.clone(), &config.genetics)?;

        tracing::info!(
            plants = plants.len() - 1,
            stats = stats.len(),
            genes = genes.len(),
            mutations = mutations.len(),
            "Genetics initialised"
        );

        Ok(Self {
            plants,
            stats,
            mutations,
            genes,
        })
    }

    /// Registries borrowed for one tick.
    #[must_use]
    pub fn context(&self) -> MutationContext<'_> {
        MutationContext::new(&self.genes, &self.stats)
    }

    /// A genome carrying `plant` and every other gene's default.
    pub fn default_genome(&self, plant: PlantRef) -> Result<Genome> {
        Genome::for_plant(&self.genes, plant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrigenome_data::{PlantId, Seed, StatId};

    #[test]
    fn test_default_config_wires_registries() {
        let config = AppConfig::default();
        let genetics = Genetics::from_config(&config).unwrap();
        // Sentinel plus configured plants.
        assert_eq!(genetics.plants.len(), config.plants.len() + 1);
        assert_eq!(genetics.stats.len(), 6);
        // Species gene plus one gene per stat.
        assert_eq!(genetics.genes.len(), 7);
        assert_eq!(genetics.mutations.len(), config.mutations.len());
        assert!(genetics.plants.is_seed(&Seed::new("potato_seeds")));
    }

    #[test]
    fn test_default_genome_uses_default_stat() {
        let config = AppConfig::default();
        let genetics = Genetics::from_config(&config).unwrap();
        let wheat = genetics.plants.get(&PlantId::new("wheat")).unwrap().clone();
        let genome = genetics.default_genome(wheat.clone()).unwrap();
        assert_eq!(genome.species(&genetics.genes).unwrap(), wheat);
        assert_eq!(
            genome.stat_value(&StatId::new("fertility")),
            Some(config.genetics.default_stat)
        );
    }

    #[test]
    fn test_unknown_mutation_child_rejected() {
        let mut config = AppConfig::default();
        config.mutations[0].child = PlantId::new("pumpkin");
        assert!(Genetics::from_config(&config).is_err());
    }
}
