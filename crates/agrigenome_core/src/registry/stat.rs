use crate::error::RegistryError;
use agrigenome_data::data::stat::{FERTILITY, GAIN, GROWTH, MUTATIVITY, RESISTANCE, STRENGTH};
use agrigenome_data::{Stat, StatId};
use std::collections::BTreeMap;

/// Stat definitions. The fertility stat is always present.
#[derive(Debug, Clone)]
pub struct StatRegistry {
    stats: BTreeMap<StatId, Stat>,
    fertility: Stat,
}

impl StatRegistry {
    /// A registry holding only `fertility`.
    pub fn new(fertility: Stat) -> Result<Self, RegistryError> {
        validate(&fertility)?;
        let mut stats = BTreeMap::new();
        stats.insert(fertility.id.clone(), fertility.clone());
        Ok(Self { stats, fertility })
    }

    /// The six stats every crop carries, all bounded by `max`.
    pub fn standard(max: u8) -> Result<Self, RegistryError> {
        let mut registry = Self::new(Stat::new(FERTILITY, max))?;
        for id in [GROWTH, GAIN, STRENGTH, RESISTANCE, MUTATIVITY] {
            registry.add(Stat::new(id, max))?;
        }
        Ok(registry)
    }

    /// Registers a stat exactly once.
    pub fn add(&mut self, stat: Stat) -> Result<(), RegistryError> {
        validate(&stat)?;
        if self.stats.contains_key(&stat.id) {
            return Err(RegistryError::duplicate("stat", stat.id.as_str()));
        }
        self.stats.insert(stat.id.clone(), stat);
        Ok(())
    }

    /// Looks up a stat by id.
    #[must_use]
    pub fn get(&self, id: &StatId) -> Option<&Stat> {
        self.stats.get(id)
    }

    /// The stat that drives parent selection.
    #[must_use]
    pub fn fertility(&self) -> &Stat {
        &self.fertility
    }

    /// Registered stats ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.values()
    }

    /// Number of registered stats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no stats are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

fn validate(stat: &Stat) -> Result<(), RegistryError> {
    if stat.max == 0 {
        return Err(RegistryError::invalid(
            "stat",
            stat.id.as_str(),
            "max must be positive",
        ));
    }
    Ok(())
}
