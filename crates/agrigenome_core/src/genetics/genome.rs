use super::gene::{downcast_gene, AnyGene, Gene, GeneId};
use crate::error::{GeneticsError, Result};
use crate::plant::PlantRef;
use crate::registry::GeneRegistry;
use agrigenome_data::{Allel, AllelValue, GenePair, StatId};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Type-erased [`GenePair`] stored inside a genome.
pub trait AnyGenePair: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn eq_pair(&self, other: &dyn AnyGenePair) -> bool;
}

impl<T: AllelValue> AnyGenePair for GenePair<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_pair(&self, other: &dyn AnyGenePair) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
}

#[derive(Clone)]
struct Slot {
    gene: Arc<dyn AnyGene>,
    pair: Arc<dyn AnyGenePair>,
}

/// A complete, immutable genetic blueprint: one pair per registered gene.
///
/// Only [`GenomeBuilder::build`] creates genomes, so every genome holds a
/// pair for each gene of the registry it was built against.
#[derive(Clone)]
pub struct Genome {
    slots: BTreeMap<GeneId, Slot>,
}

impl Genome {
    /// Genome of a freshly planted seed: the plant's species plus every
    /// other gene at its default.
    pub fn for_plant(genes: &GeneRegistry, plant: PlantRef) -> Result<Self> {
        let mut builder = GenomeBuilder::new(genes, plant);
        builder.fill_defaults();
        builder.build()
    }

    /// The pair stored for `gene`.
    pub fn pair<T: AllelValue>(&self, gene: &Gene<T>) -> Result<&GenePair<T>> {
        self.pair_by_id(gene.id())
    }

    /// The pair stored under `id`, downcast to `T`.
    pub fn pair_by_id<T: AllelValue>(&self, id: &GeneId) -> Result<&GenePair<T>> {
        let slot = self
            .slots
            .get(id)
            .ok_or_else(|| GeneticsError::UnregisteredGene(id.clone()))?;
        slot.pair
            .as_any()
            .downcast_ref::<GenePair<T>>()
            .ok_or_else(|| GeneticsError::TypeMismatch {
                gene: id.clone(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Expressed trait of `gene`, resolved by the gene's own rule.
    pub fn trait_value<T: AllelValue>(&self, gene: &Gene<T>) -> Result<T> {
        Ok(gene.resolve(self.pair(gene)?))
    }

    /// Expressed trait of the gene registered under `id`.
    pub fn trait_by_id<T: AllelValue>(&self, id: &GeneId) -> Result<T> {
        let slot = self
            .slots
            .get(id)
            .ok_or_else(|| GeneticsError::UnregisteredGene(id.clone()))?;
        let gene = downcast_gene::<T>(slot.gene.as_ref())?;
        self.trait_value(gene)
    }

    /// Expressed species, resolved through the registry's species gene.
    pub fn species(&self, genes: &GeneRegistry) -> Result<PlantRef> {
        self.trait_value(genes.species().as_ref())
    }

    /// Expressed value of the stat gene named after `stat`, if present.
    #[must_use]
    pub fn stat_value(&self, stat: &StatId) -> Option<u8> {
        self.trait_by_id::<u8>(&GeneId::from(stat)).ok()
    }

    /// Whether the genome carries a pair for `id`.
    #[must_use]
    pub fn contains(&self, id: &GeneId) -> bool {
        self.slots.contains_key(id)
    }

    /// Ids of every gene carried, ordered by id.
    pub fn gene_ids(&self) -> impl Iterator<Item = &GeneId> {
        self.slots.keys()
    }

    /// Number of genes carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the genome carries no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PartialEq for Genome {
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self.slots.iter().all(|(id, slot)| {
                other
                    .slots
                    .get(id)
                    .is_some_and(|o| slot.pair.eq_pair(o.pair.as_ref()))
            })
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(id, slot)| (id, &slot.pair)))
            .finish()
    }
}

/// Staged genome construction, sealed by [`GenomeBuilder::build`].
pub struct GenomeBuilder<'r> {
    registry: &'r GeneRegistry,
    slots: BTreeMap<GeneId, Slot>,
}

impl<'r> GenomeBuilder<'r> {
    /// Starts a genome whose species gene is homozygous for `species`.
    pub fn new(registry: &'r GeneRegistry, species: PlantRef) -> Self {
        let gene = registry.species();
        let allel = Allel::new(species.id().to_string(), species);
        let mut slots = BTreeMap::new();
        slots.insert(
            gene.id().clone(),
            Slot {
                gene: Arc::clone(gene) as Arc<dyn AnyGene>,
                pair: Arc::new(GenePair::homozygous(allel)),
            },
        );
        Self { registry, slots }
    }

    /// Assigns `pair` to `gene`, replacing any earlier assignment.
    pub fn set<T: AllelValue>(&mut self, gene: &Gene<T>, pair: GenePair<T>) -> Result<&mut Self> {
        let registered = self.registered(gene.id())?;
        downcast_gene::<T>(registered.as_ref())?;
        self.slots.insert(
            gene.id().clone(),
            Slot {
                gene: registered,
                pair: Arc::new(pair),
            },
        );
        Ok(self)
    }

    /// Assigns every registered gene, in registration order, from `f`.
    pub fn populate<F>(&mut self, mut f: F) -> Result<&mut Self>
    where
        F: FnMut(&dyn AnyGene) -> Result<Arc<dyn AnyGenePair>>,
    {
        for gene in self.registry.iter() {
            let pair = f(gene.as_ref())?;
            if !gene.accepts(pair.as_ref()) {
                return Err(GeneticsError::TypeMismatch {
                    gene: gene.id().clone(),
                    expected: gene.value_type(),
                });
            }
            self.slots.insert(
                gene.id().clone(),
                Slot {
                    gene: Arc::clone(gene),
                    pair,
                },
            );
        }
        Ok(self)
    }

    /// Assigns the default pair to every gene not set yet.
    pub fn fill_defaults(&mut self) -> &mut Self {
        for gene in self.registry.iter() {
            self.slots
                .entry(gene.id().clone())
                .or_insert_with(|| Slot {
                    gene: Arc::clone(gene),
                    pair: gene.default_pair(),
                });
        }
        self
    }

    /// Seals the genome, failing when a registered gene was never assigned.
    pub fn build(self) -> Result<Genome> {
        let missing: Vec<GeneId> = self
            .registry
            .iter()
            .filter(|gene| !self.slots.contains_key(gene.id()))
            .map(|gene| gene.id().clone())
            .collect();
        if !missing.is_empty() {
            return Err(GeneticsError::IncompleteGenome(missing));
        }
        Ok(Genome { slots: self.slots })
    }

    fn registered(&self, id: &GeneId) -> Result<Arc<dyn AnyGene>> {
        self.registry
            .get_any(id)
            .cloned()
            .ok_or_else(|| GeneticsError::UnregisteredGene(id.clone()))
    }
}
