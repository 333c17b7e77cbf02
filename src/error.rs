//! Construction errors.

use std::collections::TryReserveError;

/// Allocation failures surfaced by the fallible constructors and inserts.
///
/// Lookups and removals never produce an error; only sizing the fixed bucket
/// array and allocating storage can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no prime bucket count at or above {requested} fits in usize")]
    CapacityOverflow { requested: usize },
    #[error("bucket array allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("room for {additional} more entries exceeds usize")]
    EntryOverflow { additional: usize },
    #[error("entry storage reservation failed: {0}")]
    Reserve(TryReserveError),
}
