//! # Adapters
//!
//! Reference implementations of the outbound store port.
//!
//! - `memory` - `InMemoryLedger`, an ordered in-process world state
//! - `file` - `FileBackedLedger`, the same world state persisted to disk
//! - `transaction` - `TransactionContext`, per-invocation write buffering

mod file;
mod memory;
mod transaction;

pub use file::FileBackedLedger;
pub use memory::InMemoryLedger;
pub use transaction::TransactionContext;

use crate::domain::errors::KVStoreError;
use std::ops::Bound;

/// Translate scan bounds into a `BTreeMap` range. Empty means open.
pub(crate) fn key_range<'k>(
    start: &'k str,
    end: &'k str,
) -> Result<(Bound<&'k str>, Bound<&'k str>), KVStoreError> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return Err(KVStoreError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    Ok((lower, upper))
}
