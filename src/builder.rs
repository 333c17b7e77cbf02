//! Builder for tables with non-default functors.

use crate::chained_hash_map::{ChainedHashMap, DEFAULT_CAPACITY};
use crate::error::Error;
use crate::hash::{EqualTo, StdHasher};

/// Collects the construction parameters of a [`ChainedHashMap`].
///
/// ```
/// use chained_hashmap::{Builder, Fnv1a};
///
/// let mut blocked = Builder::new(4481).hasher(Fnv1a).build();
/// blocked.insert("217.60.239.0/24".to_string(), 1);
/// assert!(blocked.contains_key("217.60.239.0/24"));
/// assert_eq!(blocked.bucket_count(), 4481);
/// ```
#[derive(Clone, Debug)]
pub struct Builder<H = StdHasher, E = EqualTo> {
    capacity: usize,
    hasher: H,
    key_eq: E,
}

impl Builder {
    /// Starts from the default functors. `capacity` is rounded up to a prime
    /// when the table is built.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hasher: StdHasher::default(),
            key_eq: EqualTo,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<H, E> Builder<H, E> {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn hasher<H2>(self, hasher: H2) -> Builder<H2, E> {
        Builder {
            capacity: self.capacity,
            hasher,
            key_eq: self.key_eq,
        }
    }

    pub fn key_eq<E2>(self, key_eq: E2) -> Builder<H, E2> {
        Builder {
            capacity: self.capacity,
            hasher: self.hasher,
            key_eq,
        }
    }

    pub fn try_build<K, V>(self) -> Result<ChainedHashMap<K, V, H, E>, Error> {
        ChainedHashMap::try_with_capacity_hasher_and_eq(self.capacity, self.hasher, self.key_eq)
    }

    /// # Panics
    ///
    /// If the bucket array cannot be sized or allocated.
    pub fn build<K, V>(self) -> ChainedHashMap<K, V, H, E> {
        ChainedHashMap::with_capacity_hasher_and_eq(self.capacity, self.hasher, self.key_eq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::PolynomialRollingHash;

    #[test]
    fn defaults_match_new() {
        let m: ChainedHashMap<String, i32> = Builder::default().build();
        assert_eq!(m.bucket_count(), ChainedHashMap::<String, i32>::new().bucket_count());
    }

    #[test]
    fn swaps_functors_and_capacity() {
        let mut m = Builder::new(1)
            .capacity(20)
            .hasher(PolynomialRollingHash)
            .build::<String, usize>();
        assert_eq!(m.bucket_count(), 23);
        m.insert("A".to_string(), 1);
        assert_eq!(m.bucket("A"), 65 % 23);
    }

    #[test]
    fn try_build_surfaces_overflow() {
        let r = Builder::new(usize::MAX).try_build::<String, i32>();
        assert!(matches!(r, Err(Error::CapacityOverflow { .. })));
    }
}
