//! Node storage and the table-wide traversal order.
//!
//! Nodes live in a slot arena; chain links and bucket slots hold arena keys,
//! never ownership. Total order is ascending bucket index, then chain order
//! within a bucket. Every function here is a pure function of the arena and
//! the bucket slots, so the order can be tested without the table's
//! mutation API.

use slotmap::{DefaultKey, SlotMap};

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) next: Option<DefaultKey>,
}

pub(crate) type Arena<K, V> = SlotMap<DefaultKey, Node<K, V>>;
pub(crate) type Buckets = [Option<DefaultKey>];

#[inline]
pub(crate) fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

/// First non-empty bucket at or after `from`, with its head.
pub(crate) fn first_occupied(buckets: &Buckets, from: usize) -> Option<(usize, DefaultKey)> {
    buckets
        .get(from..)?
        .iter()
        .enumerate()
        .find_map(|(offset, head)| head.map(|k| (from + offset, k)))
}

/// Position after `current` in traversal order: the chain successor if
/// there is one, otherwise the head of the next non-empty bucket.
///
/// A key that no longer resolves has no successor.
pub(crate) fn successor<K, V>(
    slots: &Arena<K, V>,
    buckets: &Buckets,
    current: DefaultKey,
) -> Option<DefaultKey> {
    let node = slots.get(current)?;
    if node.next.is_some() {
        return node.next;
    }
    let bucket = bucket_index(node.hash, buckets.len());
    first_occupied(buckets, bucket + 1).map(|(_, k)| k)
}

/// Walks one chain from `head`, yielding arena keys with their nodes.
pub(crate) struct Chain<'a, K, V> {
    slots: &'a Arena<K, V>,
    cursor: Option<DefaultKey>,
}

impl<'a, K, V> Chain<'a, K, V> {
    pub(crate) fn new(slots: &'a Arena<K, V>, head: Option<DefaultKey>) -> Self {
        Self {
            slots,
            cursor: head,
        }
    }
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (DefaultKey, &'a Node<K, V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node = self.slots.get(k)?;
        self.cursor = node.next;
        Some((k, node))
    }
}
