use std::fmt;
use std::sync::Arc;

/// Payload carried by an allel.
///
/// Every gene is parameterised by one payload type. `dominates` decides which
/// of two allels sitting on the same locus is expressed.
pub trait AllelValue: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Returns true when `self` masks `other` in a heterozygous pair.
    fn dominates(&self, _other: &Self) -> bool {
        false
    }
}

/// Stat allels: the higher value is expressed.
impl AllelValue for u8 {
    fn dominates(&self, other: &Self) -> bool {
        self > other
    }
}

/// Flag allels: a present trait masks an absent one.
impl AllelValue for bool {
    fn dominates(&self, other: &Self) -> bool {
        *self && !*other
    }
}

struct AllelData<T> {
    name: String,
    value: T,
}

/// An immutable, named genetic value.
///
/// Cloning an `Allel` shares the same instance. Two allels built separately
/// compare equal when name and value match, yet [`Allel::same_instance`]
/// still tells them apart.
pub struct Allel<T> {
    inner: Arc<AllelData<T>>,
}

impl<T: AllelValue> Allel<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            inner: Arc::new(AllelData {
                name: name.into(),
                value,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.inner.value
    }

    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        self.inner.value.dominates(&other.inner.value)
    }

    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Allel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PartialEq> PartialEq for Allel<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name && self.inner.value == other.inner.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Allel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allel")
            .field("name", &self.inner.name)
            .field("value", &self.inner.value)
            .finish()
    }
}
