//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the asset registry.
//!
//! These are the interfaces the hosting ledger platform implements. The
//! registry only ever reads, writes and range-scans; atomic application of an
//! invocation's writes is the platform's business (`AtomicBatchWrite`).

use crate::domain::entities::Lot;
use crate::domain::errors::{CodecError, KVStoreError};

/// A key and the raw bytes stored under it.
pub type KvPair = (String, Vec<u8>);

/// Ordered key-value world state, bound to one transaction.
///
/// Testing: `InMemoryLedger`
/// Persistent: `FileBackedLedger`
/// Per-invocation scope: `TransactionContext`
pub trait KeyValueStore {
    /// Read the current value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Write or overwrite the value under `key`.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), KVStoreError>;

    /// Iterate `[start, end)` in ascending key order.
    ///
    /// An empty `start` or `end` leaves that side of the range open, so
    /// `scan("", "")` walks the whole namespace. The returned handle holds
    /// store-side resources until it is dropped or closed.
    fn scan(&self, start: &str, end: &str) -> Result<StateIterator<'_>, KVStoreError>;
}

/// Stores that can apply a set of writes all-or-nothing.
pub trait AtomicBatchWrite: KeyValueStore {
    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;
}

/// Batch operation for atomic writes.
///
/// The registry never deletes records, so puts are the only operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: String, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Handle over an in-progress range scan.
///
/// Yields `(key, value)` pairs in ascending key order. The release hook runs
/// exactly once, when the handle is closed or dropped, whichever comes first.
pub struct StateIterator<'a> {
    inner: Box<dyn Iterator<Item = Result<KvPair, KVStoreError>> + 'a>,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> StateIterator<'a> {
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = Result<KvPair, KVStoreError>> + 'a,
    {
        Self {
            inner: Box::new(inner),
            release: None,
        }
    }

    /// An iterator over nothing.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Attach the hook that frees store-side resources for this scan.
    pub fn with_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Release the scan explicitly.
    pub fn close(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Iterator for StateIterator<'_> {
    type Item = Result<KvPair, KVStoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl Drop for StateIterator<'_> {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for StateIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateIterator")
            .field("releasable", &self.release.is_some())
            .finish()
    }
}

/// Encodes Lots into the canonical record bytes and back.
pub trait LotCodec: Send + Sync {
    /// Serialize a Lot to bytes.
    fn encode(&self, lot: &Lot) -> Result<Vec<u8>, CodecError>;

    /// Deserialize bytes to a Lot.
    fn decode(&self, data: &[u8]) -> Result<Lot, CodecError>;
}

/// Default codec: the JSON record format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLotCodec;

impl LotCodec for JsonLotCodec {
    fn encode(&self, lot: &Lot) -> Result<Vec<u8>, CodecError> {
        // A flattened extension named like a known field would emit a duplicate key.
        if let Some(field) = lot.shadowed_field() {
            return Err(CodecError {
                message: format!("extension field {:?} shadows a record field", field),
            });
        }
        Ok(serde_json::to_vec(lot)?)
    }

    fn decode(&self, data: &[u8]) -> Result<Lot, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}
