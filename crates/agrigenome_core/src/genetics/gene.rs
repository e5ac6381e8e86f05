use super::genome::{AnyGenePair, Genome};
use super::mutator::Mutator;
use crate::error::{GeneticsError, Result};
use agrigenome_data::{Allel, AllelValue, GenePair, StatId};
use rand::{Rng, RngCore};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identity of one genetic locus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneId(String);

impl GeneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GeneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Stat genes share their stat's identifier.
impl From<&StatId> for GeneId {
    fn from(id: &StatId) -> Self {
        Self::new(id.as_str())
    }
}

/// Turns a gene pair into the trait the crop expresses.
pub type TraitResolver<T> = fn(&GenePair<T>) -> T;

/// A typed genetic locus with its default allel and mutation policy.
pub struct Gene<T: AllelValue> {
    id: GeneId,
    default_allel: Allel<T>,
    mutator: Arc<dyn Mutator<T>>,
    resolver: Option<TraitResolver<T>>,
}

impl<T: AllelValue> Gene<T> {
    pub fn new(id: impl Into<String>, default_value: T, mutator: Arc<dyn Mutator<T>>) -> Self {
        let id = GeneId::new(id);
        let default_allel = Allel::new(format!("{id}:default"), default_value);
        Self {
            id,
            default_allel,
            mutator,
            resolver: None,
        }
    }

    /// Overrides the default "dominant value wins" expression rule.
    #[must_use]
    pub fn with_resolver(mut self, resolver: TraitResolver<T>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn id(&self) -> &GeneId {
        &self.id
    }

    #[must_use]
    pub fn mutator(&self) -> &Arc<dyn Mutator<T>> {
        &self.mutator
    }

    #[must_use]
    pub fn default_allel(&self) -> &Allel<T> {
        &self.default_allel
    }

    #[must_use]
    pub fn default_pair(&self) -> GenePair<T> {
        GenePair::homozygous(self.default_allel.clone())
    }

    #[must_use]
    pub fn resolve(&self, pair: &GenePair<T>) -> T {
        match self.resolver {
            Some(resolver) => resolver(pair),
            None => pair.trait_value().clone(),
        }
    }

    /// Draws the offspring's pair: one allel from each parent by an unbiased
    /// coin flip, then hands both to this gene's mutator.
    pub fn mutate_pair(
        &self,
        parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<GenePair<T>> {
        let first = pick_random_allel(parents.0.pair(self)?, rng).clone();
        let second = pick_random_allel(parents.1.pair(self)?, rng).clone();
        self.mutator
            .pick_or_mutate(self, &first, &second, parents, rng)
    }
}

fn pick_random_allel<'a, T: AllelValue>(pair: &'a GenePair<T>, rng: &mut dyn RngCore) -> &'a Allel<T> {
    if rng.gen_bool(0.5) {
        pair.dominant()
    } else {
        pair.recessive()
    }
}

impl<T: AllelValue> fmt::Debug for Gene<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gene")
            .field("id", &self.id)
            .field("default", self.default_allel.value())
            .finish_non_exhaustive()
    }
}

/// Type-erased view of a [`Gene`], as held by the gene registry.
pub trait AnyGene: Send + Sync {
    fn id(&self) -> &GeneId;

    /// Name of the allel payload type.
    fn value_type(&self) -> &'static str;

    fn default_pair(&self) -> Arc<dyn AnyGenePair>;

    /// Whether `pair` carries this gene's payload type.
    fn accepts(&self, pair: &dyn AnyGenePair) -> bool;

    fn mutate(
        &self,
        parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<Arc<dyn AnyGenePair>>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: AllelValue> AnyGene for Gene<T> {
    fn id(&self) -> &GeneId {
        &self.id
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn default_pair(&self) -> Arc<dyn AnyGenePair> {
        Arc::new(Gene::default_pair(self))
    }

    fn accepts(&self, pair: &dyn AnyGenePair) -> bool {
        pair.as_any().is::<GenePair<T>>()
    }

    fn mutate(
        &self,
        parents: (&Genome, &Genome),
        rng: &mut dyn RngCore,
    ) -> Result<Arc<dyn AnyGenePair>> {
        Ok(Arc::new(self.mutate_pair(parents, rng)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Recovers the typed gene behind an erased handle.
pub(crate) fn downcast_gene<T: AllelValue>(gene: &dyn AnyGene) -> Result<&Gene<T>> {
    gene.as_any()
        .downcast_ref::<Gene<T>>()
        .ok_or_else(|| GeneticsError::TypeMismatch {
            gene: gene.id().clone(),
            expected: std::any::type_name::<T>(),
        })
}
