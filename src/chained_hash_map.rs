//! ChainedHashMap: separate chaining over a fixed, prime-sized bucket array.

use crate::error::Error;
use crate::hash::{EqualTo, KeyEq, KeyHasher, StdHasher};
use crate::primes::next_greater_or_equal_prime;
use crate::reentrancy::ProbeGuard;
use crate::traverse::{bucket_index, first_occupied, successor, Arena, Buckets, Chain, Node};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use log::{debug, trace};
use slotmap::{DefaultKey, SecondaryMap};
use std::sync::atomic::{AtomicU32, Ordering};

/// Bucket count requested by [`ChainedHashMap::new`] and `Default`; rounds
/// up to 17.
pub const DEFAULT_CAPACITY: usize = 16;

// Stamps each table so a handle only ever resolves in the table that
// produced it.
static NEXT_TABLE_ID: AtomicU32 = AtomicU32::new(1);

/// Position of one entry, as returned by `find`, `insert` and the traversal
/// functions.
///
/// A handle does not borrow the table. It resolves for as long as its entry
/// is live; once the entry is erased (or the table cleared) it never
/// resolves again, even if the arena slot is reused. A handle belongs to the
/// table that issued it (and follows the contents through `take`); any
/// other table, clones included, treats it as unresolvable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    table: u32,
    slot: DefaultKey,
}

impl Handle {
    pub fn key<'a, K, V, H, E>(&self, map: &'a ChainedHashMap<K, V, H, E>) -> Option<&'a K> {
        map.slots.get(map.resolve(*self)?).map(|n| &n.key)
    }

    pub fn value<'a, K, V, H, E>(&self, map: &'a ChainedHashMap<K, V, H, E>) -> Option<&'a V> {
        map.slots.get(map.resolve(*self)?).map(|n| &n.value)
    }

    pub fn value_mut<'a, K, V, H, E>(
        &self,
        map: &'a mut ChainedHashMap<K, V, H, E>,
    ) -> Option<&'a mut V> {
        let slot = map.resolve(*self)?;
        map.slots.get_mut(slot).map(|n| &mut n.value)
    }
}

/// Separate-chaining map with a fixed prime bucket count. `H` and `E` are
/// the key functors; see [`KeyHasher`] and [`KeyEq`].
pub struct ChainedHashMap<K, V, H = StdHasher, E = EqualTo> {
    slots: Arena<K, V>,
    buckets: Box<Buckets>,
    // Lowest non-empty bucket; `buckets.len()` when the table is empty.
    first_bucket: usize,
    hasher: H,
    key_eq: E,
    guard: ProbeGuard,
    id: u32,
}

fn alloc_buckets(requested: usize) -> Result<Box<Buckets>, Error> {
    let count =
        next_greater_or_equal_prime(requested).ok_or(Error::CapacityOverflow { requested })?;
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(count)?;
    buckets.resize(count, None);
    Ok(buckets.into_boxed_slice())
}

impl<K, V> ChainedHashMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// # Panics
    ///
    /// If the bucket array cannot be sized or allocated; see
    /// [`ChainedHashMap::try_with_capacity_hasher_and_eq`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_hasher_and_eq(capacity, StdHasher::default(), EqualTo)
    }
}

impl<K, V, H> ChainedHashMap<K, V, H> {
    /// # Panics
    ///
    /// If the bucket array cannot be sized or allocated.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        Self::with_capacity_hasher_and_eq(capacity, hasher, EqualTo)
    }
}

impl<K, V, H, E> ChainedHashMap<K, V, H, E> {
    /// Builds an empty table with `capacity` rounded up to a prime number of
    /// buckets. The bucket count never changes afterwards.
    pub fn try_with_capacity_hasher_and_eq(
        capacity: usize,
        hasher: H,
        key_eq: E,
    ) -> Result<Self, Error> {
        let buckets = alloc_buckets(capacity)?;
        debug!(
            "chained map: {} buckets requested, {} allocated",
            capacity,
            buckets.len()
        );
        Ok(Self::from_parts(buckets, hasher, key_eq))
    }

    /// # Panics
    ///
    /// If the bucket array cannot be sized or allocated.
    pub fn with_capacity_hasher_and_eq(capacity: usize, hasher: H, key_eq: E) -> Self {
        match Self::try_with_capacity_hasher_and_eq(capacity, hasher, key_eq) {
            Ok(map) => map,
            Err(e) => panic!("{}", e),
        }
    }

    fn from_parts(buckets: Box<Buckets>, hasher: H, key_eq: E) -> Self {
        Self {
            slots: Arena::new(),
            first_bucket: buckets.len(),
            buckets,
            hasher,
            key_eq,
            guard: ProbeGuard::new(),
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    fn handle(&self, slot: DefaultKey) -> Handle {
        Handle {
            table: self.id,
            slot,
        }
    }

    // Arena key behind `position`, if this table issued it.
    fn resolve(&self, position: Handle) -> Option<DefaultKey> {
        (position.table == self.id).then_some(position.slot)
    }

    fn head(&self) -> Option<DefaultKey> {
        self.buckets.get(self.first_bucket).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
    pub fn key_eq(&self) -> &E {
        &self.key_eq
    }

    /// `len / bucket_count`. Observational only: nothing ever resizes.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Number of entries chained in bucket `n`; 0 if `n` is out of range.
    pub fn bucket_len(&self, n: usize) -> usize {
        self.bucket_iter(n).count()
    }

    /// Entries of bucket `n`, newest first. Empty if `n` is out of range.
    pub fn bucket_iter(&self, n: usize) -> LocalIter<'_, K, V> {
        let head = self.buckets.get(n).copied().flatten();
        LocalIter {
            chain: Chain::new(&self.slots, head),
        }
    }

    /// Position where traversal starts: the head of the lowest non-empty
    /// bucket. `None` iff the table is empty.
    pub fn first(&self) -> Option<Handle> {
        self.head().map(|k| self.handle(k))
    }

    /// Position following `position` in traversal order; `None` past the
    /// last entry or for a handle that does not resolve here.
    pub fn next_position(&self, position: Handle) -> Option<Handle> {
        let slot = self.resolve(position)?;
        successor(&self.slots, &self.buckets, slot).map(|k| self.handle(k))
    }

    /// Entries in ascending bucket order, newest first within a bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            buckets: &self.buckets,
            cursor: self.head(),
            remaining: self.len(),
        }
    }

    /// Mutable entries in the same order as [`ChainedHashMap::iter`].
    ///
    /// The traversal order is resolved up front, so this allocates two
    /// `len()`-sized buffers.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let mut rank = SecondaryMap::with_capacity(self.slots.len());
        let mut cursor = self.head();
        while let Some(k) = cursor {
            let r = rank.len();
            rank.insert(k, r);
            cursor = successor(&self.slots, &self.buckets, k);
        }
        let mut ordered: Vec<Option<(&K, &mut V)>> = Vec::new();
        ordered.resize_with(rank.len(), || None);
        for (k, node) in self.slots.iter_mut() {
            if let Some(&r) = rank.get(k) {
                ordered[r] = Some((&node.key, &mut node.value));
            }
        }
        IterMut {
            it: ordered.into_iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Erases the entry at `position` and returns the position that followed
    /// it. A handle that does not resolve, whether stale or issued by another
    /// table, is a no-op returning `None`.
    pub fn erase_at(&mut self, position: Handle) -> Option<Handle> {
        let target = self.resolve(position)?;
        let bucket = bucket_index(self.slots.get(target)?.hash, self.buckets.len());
        // Must be computed while the node is still linked.
        let following = successor(&self.slots, &self.buckets, target);
        let prev = Chain::new(&self.slots, self.buckets[bucket])
            .take_while(|&(k, _)| k != target)
            .last()
            .map(|(k, _)| k);
        self.unlink(bucket, prev, target);
        following.map(|k| self.handle(k))
    }

    pub fn clear(&mut self) {
        let released = self.slots.len();
        self.slots.clear();
        self.buckets.fill(None);
        self.first_bucket = self.buckets.len();
        if released > 0 {
            debug!("chained map: cleared {} entries", released);
        }
    }

    /// Writes one line per bucket: `"<index>: (key, value) (key, value) "`.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        for (n, head) in self.buckets.iter().enumerate() {
            write!(out, "{}: ", n)?;
            for (_, node) in Chain::new(&self.slots, *head) {
                write!(out, "({}, {}) ", node.key, node.value)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn link_front(&mut self, hash: u64, key: K, value: V) -> DefaultKey {
        let bucket = bucket_index(hash, self.buckets.len());
        let next = self.buckets[bucket];
        let k = self.slots.insert(Node {
            key,
            value,
            hash,
            next,
        });
        self.buckets[bucket] = Some(k);
        if bucket < self.first_bucket {
            trace!(
                "chained map: head moves from bucket {} to {}",
                self.first_bucket,
                bucket
            );
            self.first_bucket = bucket;
        }
        k
    }

    fn unlink(
        &mut self,
        bucket: usize,
        prev: Option<DefaultKey>,
        target: DefaultKey,
    ) -> Option<Node<K, V>> {
        let node = self.slots.remove(target)?;
        match prev {
            Some(p) => {
                if let Some(p) = self.slots.get_mut(p) {
                    p.next = node.next;
                }
            }
            None => self.buckets[bucket] = node.next,
        }
        if bucket == self.first_bucket && self.buckets[bucket].is_none() {
            let next = first_occupied(&self.buckets, bucket + 1)
                .map_or(self.buckets.len(), |(b, _)| b);
            trace!(
                "chained map: bucket {} emptied, head moves to {}",
                bucket,
                next
            );
            self.first_bucket = next;
        }
        Some(node)
    }

    /// Hashes `q` and scans its chain; on a match returns the matching node
    /// and its in-chain predecessor.
    fn locate<Q>(
        &self,
        op: &'static str,
        q: &Q,
    ) -> (u64, Option<(Option<DefaultKey>, DefaultKey)>)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        let _g = self.guard.enter(op);
        let hash = self.hasher.hash_key(q);
        let head = self.buckets[bucket_index(hash, self.buckets.len())];
        let mut prev = None;
        for (k, node) in Chain::new(&self.slots, head) {
            if node.hash == hash && self.key_eq.key_eq(node.key.borrow(), q) {
                return (hash, Some((prev, k)));
            }
            prev = Some(k);
        }
        (hash, None)
    }

    /// Bucket index `q` hashes to.
    pub fn bucket<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized,
        H: KeyHasher<Q>,
    {
        let _g = self.guard.enter("bucket");
        bucket_index(self.hasher.hash_key(q), self.buckets.len())
    }

    pub fn find<Q>(&self, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        self.locate("find", q).1.map(|(_, k)| self.handle(k))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        self.locate("contains_key", q).1.is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        let (_, k) = self.locate("get", q).1?;
        self.slots.get(k).map(|n| (&n.key, &n.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        let (_, k) = self.locate("get_mut", q).1?;
        self.slots.get_mut(k).map(|n| &mut n.value)
    }

    /// Inserts `key -> value` unless `key` is already present.
    ///
    /// Returns the entry's handle and whether it was inserted. The first
    /// insert of a key wins: on a duplicate the table is left untouched and
    /// `value` is dropped. New entries become the head of their bucket.
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool)
    where
        H: KeyHasher<K>,
        E: KeyEq<K>,
    {
        match self.locate("insert", &key) {
            (_, Some((_, k))) => (self.handle(k), false),
            (hash, None) => {
                let k = self.link_front(hash, key, value);
                (self.handle(k), true)
            }
        }
    }

    /// [`insert`](ChainedHashMap::insert) that reports a failure to grow the
    /// entry storage instead of aborting. A duplicate key never allocates.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Handle, bool), Error>
    where
        H: KeyHasher<K>,
        E: KeyEq<K>,
    {
        match self.locate("insert", &key) {
            (_, Some((_, k))) => Ok((self.handle(k), false)),
            (hash, None) => {
                self.slots.try_reserve(1).map_err(Error::Reserve)?;
                let k = self.link_front(hash, key, value);
                Ok((self.handle(k), true))
            }
        }
    }

    /// Reserves entry storage for `additional` more inserts. The bucket
    /// array is fixed and never grows.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        if additional.checked_add(self.len()).is_none() {
            return Err(Error::EntryOverflow { additional });
        }
        self.slots.try_reserve(additional).map_err(Error::Reserve)
    }

    /// Value for `key`, inserting `default()` first if it is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
        H: KeyHasher<K>,
        E: KeyEq<K>,
    {
        let k = match self.locate("get_or_insert_with", &key) {
            (_, Some((_, k))) => k,
            (hash, None) => self.link_front(hash, key, default()),
        };
        &mut self.slots[k].value
    }

    /// Value for `key`, inserting `V::default()` first if it is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
        H: KeyHasher<K>,
        E: KeyEq<K>,
    {
        self.get_or_insert_with(key, V::default)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        let (hash, found) = self.locate("remove", q);
        let (prev, target) = found?;
        let bucket = bucket_index(hash, self.buckets.len());
        trace!("chained map: erase from bucket {}", bucket);
        self.unlink(bucket, prev, target).map(|n| (n.key, n.value))
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Number of entries removed: 1 if `q` was present, else 0.
    pub fn erase<Q>(&mut self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        H: KeyHasher<Q>,
        E: KeyEq<Q>,
    {
        usize::from(self.remove_entry(q).is_some())
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let n = self.buckets.len();
        let mut reachable = 0;
        for (b, head) in self.buckets.iter().enumerate() {
            for (_, node) in Chain::new(&self.slots, *head) {
                assert_eq!(bucket_index(node.hash, n), b, "node chained in wrong bucket");
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.slots.len(), "unreachable nodes in arena");
        let lowest = first_occupied(&self.buckets, 0).map_or(n, |(b, _)| b);
        assert_eq!(self.first_bucket, lowest, "head is not the lowest bucket");
        assert_eq!(self.iter().count(), self.len());
    }
}

impl<K: Clone, V: Clone, H, E> ChainedHashMap<K, V, H, E> {
    // Rebuilds every chain of `source` into this (empty, same-sized) table,
    // appending at the tail so each bucket keeps its order.
    fn copy_chains_from(&mut self, source: &Self) {
        debug_assert!(self.is_empty());
        debug_assert_eq!(self.buckets.len(), source.buckets.len());
        for (b, head) in source.buckets.iter().enumerate() {
            let mut tail: Option<DefaultKey> = None;
            for (_, node) in Chain::new(&source.slots, *head) {
                let k = self.slots.insert(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    hash: node.hash,
                    next: None,
                });
                match tail.and_then(|t| self.slots.get_mut(t)) {
                    Some(t) => t.next = Some(k),
                    None => self.buckets[b] = Some(k),
                }
                tail = Some(k);
            }
        }
        self.first_bucket = source.first_bucket;
    }
}

impl<K: Clone, V: Clone, H: Clone, E: Clone> Clone for ChainedHashMap<K, V, H, E> {
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(
            vec![None; self.buckets.len()].into_boxed_slice(),
            self.hasher.clone(),
            self.key_eq.clone(),
        );
        out.slots.reserve(self.len());
        out.copy_chains_from(self);
        out
    }

    /// Releases this table's entries, then deep-copies `source` into it,
    /// keeping the arena's storage.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if self.buckets.len() != source.buckets.len() {
            self.buckets = vec![None; source.buckets.len()].into_boxed_slice();
            self.first_bucket = self.buckets.len();
        }
        self.hasher.clone_from(&source.hasher);
        self.key_eq.clone_from(&source.key_eq);
        self.copy_chains_from(source);
        debug!(
            "chained map: copied {} entries across {} buckets",
            self.len(),
            self.buckets.len()
        );
    }
}

impl<K, V, H: Clone, E: Clone> ChainedHashMap<K, V, H, E> {
    /// Moves the table's contents out, leaving `self` empty with the same
    /// bucket count and functors.
    pub fn take(&mut self) -> Self {
        let fresh = Self::from_parts(
            vec![None; self.buckets.len()].into_boxed_slice(),
            self.hasher.clone(),
            self.key_eq.clone(),
        );
        debug!("chained map: moving out {} entries", self.len());
        core::mem::replace(self, fresh)
    }
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H, E> fmt::Debug for ChainedHashMap<K, V, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H, E> PartialEq for ChainedHashMap<K, V, H, E>
where
    V: PartialEq,
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| *v == *ov))
    }
}

impl<K, V, H, E> Eq for ChainedHashMap<K, V, H, E>
where
    V: Eq,
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
}

impl<K, V, H, E> Extend<(K, V)> for ChainedHashMap<K, V, H, E>
where
    H: KeyHasher<K>,
    E: KeyEq<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a ChainedHashMap<K, V, H, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a mut ChainedHashMap<K, V, H, E> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Table-wide iterator; see [`ChainedHashMap::iter`].
pub struct Iter<'a, K, V> {
    slots: &'a Arena<K, V>,
    buckets: &'a Buckets,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node = self.slots.get(k)?;
        self.cursor = successor(self.slots, self.buckets, k);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            buckets: self.buckets,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator; see [`ChainedHashMap::iter_mut`].
pub struct IterMut<'a, K, V> {
    // Indexed by traversal rank; every live entry fills exactly one slot.
    it: std::vec::IntoIter<Option<(&'a K, &'a mut V)>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.find_map(|e| e)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.it.len(), Some(self.it.len()))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Iterator over a single bucket's chain; see [`ChainedHashMap::bucket_iter`].
pub struct LocalIter<'a, K, V> {
    chain: Chain<'a, K, V>,
}

impl<'a, K, V> Iterator for LocalIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chain.next().map(|(_, n)| (&n.key, &n.value))
    }
}

impl<K, V> FusedIterator for LocalIter<'_, K, V> {}
