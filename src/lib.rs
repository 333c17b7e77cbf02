//! chained-hashmap: a single-threaded, separate-chaining hash map with a
//! fixed prime bucket array, arena-backed nodes and stable entry handles.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a classic chained table (bucket array of singly linked chains,
//!   prepend on insert, first insert wins) whose structure can be checked
//!   piece by piece.
//! - Layers:
//!   - `primes`: sizes the bucket array once, at construction.
//!   - `hash`: the `KeyHasher`/`KeyEq` functor contracts, the std adapter
//!     and the two string hashes (polynomial rolling, FNV-1a).
//!   - `traverse`: node storage plus the table-wide order as pure
//!     functions over the arena and bucket slots.
//!   - `ChainedHashMap`: probing, linking, unlinking and the public API.
//!
//! Constraints
//! - The bucket count is the smallest prime at or above the requested
//!   capacity and never changes; `load_factor` is observational only.
//! - Nodes live in a `slotmap` arena. Bucket slots and chain links hold
//!   arena keys, never ownership, so erase and move cannot dangle.
//! - Traversal order is ascending bucket index, newest first within a
//!   bucket. The start position is the head of the lowest non-empty bucket,
//!   tracked exactly on every insert and erase.
//! - Each node stores its hash; traversal and erase-by-handle never call
//!   back into the key functors.
//! - Single-threaded: the table is `!Sync`. No internal locking.
//!
//! Handles
//! - `Handle` plays the role of an iterator position: `find`, `insert`,
//!   `first` and `next_position` return one, `erase_at` consumes one and
//!   returns the next. Handles are generational; after their entry is gone
//!   they stop resolving rather than aliasing a newer entry.
//!
//! Copy and move
//! - `Clone` rebuilds the arena chain by chain and preserves per-bucket
//!   order. `take` swaps in a fresh empty table with the same bucket count
//!   and returns the old contents. The two never share code paths.
//!
//! Reentrancy policy
//! - Key functors are user code. In debug builds, a functor that calls
//!   back into the same table while it is probing panics.
//!
//! Errors
//! - Only allocation can fail (`Error`): no prime fits, the bucket array
//!   cannot be allocated, or `try_insert`/`try_reserve` cannot grow the
//!   entry storage. Misses are `None` or `0`, never errors.

mod builder;
mod chained_hash_map;
mod chained_hash_map_proptest;
mod error;
pub mod hash;
pub mod primes;
mod reentrancy;
mod traverse;

// Public surface
pub use builder::Builder;
pub use chained_hash_map::{
    ChainedHashMap, Handle, Iter, IterMut, LocalIter, DEFAULT_CAPACITY,
};
pub use error::Error;
pub use hash::{EqualTo, Fnv1a, KeyEq, KeyHasher, PolynomialRollingHash, StdHasher};
