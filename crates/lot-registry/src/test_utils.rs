use crate::adapters::InMemoryLedger;
use crate::domain::entities::{Lot, LotProduct};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{AtomicBatchWrite, BatchOperation, KeyValueStore, StateIterator};
use serde_json::Map;

/// A Lot whose `total` matches its products when `total == 100`.
pub fn make_test_lot(id: &str, total: i64) -> Lot {
    Lot {
        id: id.to_string(),
        nf_id: format!("nf-{}", id),
        lot_products: vec![
            LotProduct::new("coffee", 4, 20, "kg"),
            LotProduct::new("cocoa", 2, 10, "kg"),
        ],
        owner: "Origin Farm".to_string(),
        owner_id: 1,
        lot_type: "harvest".to_string(),
        created_at: "2024-05-01T12:00:00Z".to_string(),
        total,
        formated_address: "Rua das Flores 10, Sao Paulo".to_string(),
        extensions: Map::new(),
    }
}

fn injected(what: &str) -> KVStoreError {
    KVStoreError::Io {
        message: format!("injected {} failure", what),
    }
}

/// Ledger wrapper that fails chosen calls on demand.
#[derive(Default)]
pub struct FaultyLedger {
    pub inner: InMemoryLedger,
    pub fail_get: bool,
    pub fail_put: bool,
    pub fail_scan: bool,
    /// Yield an error after this many scan entries.
    pub fail_scan_after: Option<usize>,
    pub fail_commit: bool,
}

impl FaultyLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for FaultyLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError> {
        if self.fail_get {
            return Err(injected("get"));
        }
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), KVStoreError> {
        if self.fail_put {
            return Err(injected("put"));
        }
        self.inner.put(key, value)
    }

    fn scan(&self, start: &str, end: &str) -> Result<StateIterator<'_>, KVStoreError> {
        if self.fail_scan {
            return Err(injected("scan"));
        }
        let scan = self.inner.scan(start, end)?;
        match self.fail_scan_after {
            None => Ok(scan),
            Some(n) => Ok(StateIterator::new(
                scan.take(n).chain(std::iter::once(Err(injected("scan advance")))),
            )),
        }
    }
}

impl AtomicBatchWrite for FaultyLedger {
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        if self.fail_commit {
            return Err(injected("commit"));
        }
        self.inner.atomic_batch_write(operations)
    }
}
