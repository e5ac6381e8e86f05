use crate::crop::Crop;
use crate::registry::MutationContext;
use agrigenome_data::Stat;
use rand::{Rng, RngCore};

/// Filters and ranks the neighbours that may act as parents.
pub trait ParentSelector: Send + Sync {
    fn select_and_order<'a>(
        &self,
        neighbours: &mut dyn Iterator<Item = &'a dyn Crop>,
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a dyn Crop>;
}

/// Default selection: valid, mature and fertile neighbours, highest fertility
/// first, each kept only if it passes its own fertility roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct FertilitySelector;

impl FertilitySelector {
    /// Ascending sort key, `max - fertility`.
    #[must_use]
    pub fn priority(crop: &dyn Crop, fertility: &Stat) -> u8 {
        fertility.max - crop.stat(fertility).min(fertility.max)
    }

    /// Passes with probability `fertility / max`.
    pub fn roll_fertility(crop: &dyn Crop, fertility: &Stat, rng: &mut dyn RngCore) -> bool {
        rng.gen_range(0..fertility.max) < crop.stat(fertility)
    }
}

impl ParentSelector for FertilitySelector {
    fn select_and_order<'a>(
        &self,
        neighbours: &mut dyn Iterator<Item = &'a dyn Crop>,
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a dyn Crop> {
        let fertility = ctx.stats.fertility();
        let mut candidates: Vec<&'a dyn Crop> = neighbours
            .filter(|crop| crop.is_valid() && crop.is_mature() && crop.is_fertile())
            .collect();
        // Stable: equal fertility keeps encounter order.
        candidates.sort_by_key(|crop| Self::priority(*crop, fertility));
        candidates.retain(|crop| Self::roll_fertility(*crop, fertility, &mut *rng));
        candidates
    }
}
