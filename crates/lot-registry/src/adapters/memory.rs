//! # In-Memory Ledger
//!
//! Ordered world state held in a `BTreeMap`.

use super::key_range;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{AtomicBatchWrite, BatchOperation, KeyValueStore, StateIterator};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory ordered key-value store.
///
/// Scans walk keys in ascending byte order. The number of scan handles that
/// have not been released yet is tracked so callers can check that every
/// scan was closed.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    data: BTreeMap<String, Vec<u8>>,
    open_scans: AtomicUsize,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger over existing entries.
    pub fn from_entries(data: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            data,
            open_scans: AtomicUsize::new(0),
        }
    }

    /// All stored entries.
    pub fn entries(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of scan handles not yet released.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> Result<StateIterator<'_>, KVStoreError> {
        let range = key_range(start, end)?;
        let open_scans = &self.open_scans;
        open_scans.fetch_add(1, Ordering::SeqCst);

        let entries = self
            .data
            .range::<str, _>(range)
            .map(|(k, v)| Ok((k.clone(), v.clone())));

        Ok(StateIterator::new(entries).with_release(move || {
            open_scans.fetch_sub(1, Ordering::SeqCst);
        }))
    }
}

impl AtomicBatchWrite for InMemoryLedger {
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Nothing can fail part-way for an in-process map.
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
            }
        }
        Ok(())
    }
}
