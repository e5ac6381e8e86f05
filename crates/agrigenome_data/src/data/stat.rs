use serde::{Deserialize, Serialize};
use std::fmt;

pub const GROWTH: &str = "growth";
pub const GAIN: &str = "gain";
pub const STRENGTH: &str = "strength";
pub const RESISTANCE: &str = "resistance";
pub const FERTILITY: &str = "fertility";
pub const MUTATIVITY: &str = "mutativity";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatId(pub String);

impl StatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bounded integer attribute, valid range `[0, max]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub id: StatId,
    pub max: u8,
}

impl Stat {
    pub fn new(id: impl Into<String>, max: u8) -> Self {
        Self {
            id: StatId::new(id),
            max,
        }
    }

    #[must_use]
    pub fn clamp(&self, value: u8) -> u8 {
        value.min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_clamp() {
        let fertility = Stat::new(FERTILITY, 10);
        assert_eq!(fertility.clamp(42), 10);
        assert_eq!(fertility.clamp(3), 3);
    }

    #[test]
    fn test_stat_id_serde_transparent() {
        let id = StatId::new(GAIN);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gain\"");
    }
}
