use serde::{Deserialize, Serialize};

/// Position of a crop within its plant's growth cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrowthStage {
    pub index: u8,
    pub total: u8,
}

impl GrowthStage {
    /// Creates a stage, clamping `index` into `0..total`. A cycle always has
    /// at least one stage.
    #[must_use]
    pub fn new(index: u8, total: u8) -> Self {
        let total = total.max(1);
        Self {
            index: index.min(total - 1),
            total,
        }
    }

    #[must_use]
    pub fn first(total: u8) -> Self {
        Self::new(0, total)
    }

    #[must_use]
    pub fn last(total: u8) -> Self {
        Self::new(u8::MAX, total)
    }

    /// Mature crops sit on the final stage of their cycle.
    #[must_use]
    pub fn is_mature(&self) -> bool {
        self.index.saturating_add(1) >= self.total
    }

    #[must_use]
    pub fn next(&self) -> Option<Self> {
        if self.is_mature() {
            None
        } else {
            Some(Self::new(self.index.saturating_add(1), self.total))
        }
    }

    /// Fraction of the cycle completed, in `(0, 1]`.
    ///
    /// Deserialized stages skip the clamping in [`GrowthStage::new`], so an
    /// out-of-range index counts as mature.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.total.max(1);
        f64::from(self.index.saturating_add(1).min(total)) / f64::from(total)
    }
}
