use super::mutation::MutationRegistry;
use super::stat::StatRegistry;
use crate::config::GeneticsConfig;
use crate::error::{GeneticsError, RegistryError, Result};
use crate::genetics::gene::downcast_gene;
use crate::genetics::{AnyGene, Gene, GeneId, Mutator, SpeciesMutator, StatMutator};
use crate::plant::PlantRef;
use agrigenome_data::data::stat::MUTATIVITY;
use agrigenome_data::{AllelValue, StatId};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier of the gene every registry carries.
pub const SPECIES_GENE: &str = "species";

/// Every gene a genome must carry, in registration order.
pub struct GeneRegistry {
    genes: Vec<Arc<dyn AnyGene>>,
    index: HashMap<GeneId, usize>,
    species: Arc<Gene<PlantRef>>,
}

impl GeneRegistry {
    /// Creates a registry holding only the species gene.
    pub fn new(species_mutator: Arc<dyn Mutator<PlantRef>>) -> Self {
        let species = Arc::new(Gene::new(SPECIES_GENE, PlantRef::none(), species_mutator));
        let erased: Arc<dyn AnyGene> = species.clone();
        let mut index = HashMap::new();
        index.insert(species.id().clone(), 0);
        Self {
            genes: vec![erased],
            index,
            species,
        }
    }

    /// Species gene driven by `mutations`, plus one stat gene per registered stat.
    pub fn standard(
        stats: &StatRegistry,
        mutations: Arc<MutationRegistry>,
        config: &GeneticsConfig,
    ) -> Result<Self, RegistryError> {
        let mut genes = Self::new(Arc::new(SpeciesMutator::new(mutations)));
        let mutativity = StatId::new(MUTATIVITY);
        let scale_by_mutativity = config.use_mutativity && stats.get(&mutativity).is_some();

        for stat in stats.iter() {
            let mut mutator = StatMutator::new(stat.max, config.stat_mutation_chance);
            if scale_by_mutativity {
                mutator = mutator.with_mutativity(GeneId::from(&mutativity));
            }
            genes.register(Gene::new(
                stat.id.as_str(),
                stat.clamp(config.default_stat),
                Arc::new(mutator),
            ))?;
        }
        Ok(genes)
    }

    /// Registers a gene exactly once.
    pub fn register<T: AllelValue>(&mut self, gene: Gene<T>) -> Result<Arc<Gene<T>>, RegistryError> {
        if self.index.contains_key(gene.id()) {
            return Err(RegistryError::duplicate("gene", gene.id().as_str()));
        }
        let gene = Arc::new(gene);
        let erased: Arc<dyn AnyGene> = gene.clone();
        self.index.insert(gene.id().clone(), self.genes.len());
        self.genes.push(erased);
        tracing::debug!(gene = %gene.id(), "Registered gene");
        Ok(gene)
    }

    /// The species gene every genome carries.
    #[must_use]
    pub fn species(&self) -> &Arc<Gene<PlantRef>> {
        &self.species
    }

    /// Typed lookup; fails when the gene is missing or holds another allel type.
    pub fn get<T: AllelValue>(&self, id: &GeneId) -> Result<&Gene<T>> {
        let gene = self
            .get_any(id)
            .ok_or_else(|| GeneticsError::UnregisteredGene(id.clone()))?;
        downcast_gene::<T>(gene.as_ref())
    }

    /// Type-erased lookup.
    #[must_use]
    pub fn get_any(&self, id: &GeneId) -> Option<&Arc<dyn AnyGene>> {
        self.index.get(id).map(|&i| &self.genes[i])
    }

    /// Whether a gene with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &GeneId) -> bool {
        self.index.contains_key(id)
    }

    /// Registered genes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AnyGene>> {
        self.genes.iter()
    }

    /// Gene ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &GeneId> {
        self.genes.iter().map(|gene| gene.id())
    }

    /// Number of registered genes, species included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always false once constructed; the species gene is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
