use super::allel::{Allel, AllelValue};

/// The two allels an individual carries for one gene.
#[derive(Clone, Debug, PartialEq)]
pub struct GenePair<T: AllelValue> {
    dominant: Allel<T>,
    recessive: Allel<T>,
}

impl<T: AllelValue> GenePair<T> {
    pub fn new(dominant: Allel<T>, recessive: Allel<T>) -> Self {
        Self {
            dominant,
            recessive,
        }
    }

    /// Builds a pair from two inherited allels, promoting `second` only when
    /// it strictly dominates `first`.
    pub fn from_allels(first: Allel<T>, second: Allel<T>) -> Self {
        if second.dominates(&first) {
            Self::new(second, first)
        } else {
            Self::new(first, second)
        }
    }

    pub fn homozygous(allel: Allel<T>) -> Self {
        Self::new(allel.clone(), allel)
    }

    #[must_use]
    pub fn dominant(&self) -> &Allel<T> {
        &self.dominant
    }

    #[must_use]
    pub fn recessive(&self) -> &Allel<T> {
        &self.recessive
    }

    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        self.dominant.value() == self.recessive.value()
    }

    /// The expressed value of this pair.
    #[must_use]
    pub fn trait_value(&self) -> &T {
        self.dominant.value()
    }
}
