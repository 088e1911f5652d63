//! # Transaction Context
//!
//! Scopes one invocation's reads and writes over a ledger.
//!
//! Writes are buffered and become visible to later reads in the same
//! transaction. `commit` hands the whole buffer to the ledger as one atomic
//! batch; dropping the context without committing discards it.

use super::key_range;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{AtomicBatchWrite, BatchOperation, KeyValueStore, KvPair, StateIterator};
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Peekable;

/// Per-invocation view over a ledger.
pub struct TransactionContext<'l, L: AtomicBatchWrite + ?Sized> {
    ledger: &'l mut L,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'l, L: AtomicBatchWrite + ?Sized> TransactionContext<'l, L> {
    pub fn new(ledger: &'l mut L) -> Self {
        Self {
            ledger,
            writes: BTreeMap::new(),
        }
    }

    /// Number of keys written so far in this transaction.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply every buffered write to the ledger in one atomic batch.
    ///
    /// Read-only transactions do not touch the ledger.
    pub fn commit(self) -> Result<usize, KVStoreError> {
        let count = self.writes.len();
        if count == 0 {
            return Ok(0);
        }

        let operations = self
            .writes
            .into_iter()
            .map(|(key, value)| BatchOperation::put(key, value))
            .collect();
        self.ledger.atomic_batch_write(operations)?;
        Ok(count)
    }
}

impl<L: AtomicBatchWrite + ?Sized> KeyValueStore for TransactionContext<'_, L> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.ledger.get(key),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> Result<StateIterator<'_>, KVStoreError> {
        let range = key_range(start, end)?;
        let committed = self.ledger.scan(start, end)?;
        let pending = self.writes.range::<str, _>(range);

        Ok(StateIterator::new(MergedScan {
            committed: committed.peekable(),
            pending: pending.peekable(),
        }))
    }
}

/// Ordered merge of a ledger scan with the transaction's buffered writes.
/// On equal keys the buffered value wins.
struct MergedScan<'a> {
    committed: Peekable<StateIterator<'a>>,
    pending: Peekable<btree_map::Range<'a, String, Vec<u8>>>,
}

enum Source {
    Committed,
    Pending,
    Both,
}

impl Iterator for MergedScan<'_> {
    type Item = Result<KvPair, KVStoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = match (self.committed.peek(), self.pending.peek()) {
            (None, None) => return None,
            (Some(Err(_)), _) | (Some(Ok(_)), None) => Source::Committed,
            (None, Some(_)) => Source::Pending,
            (Some(Ok((committed_key, _))), Some((pending_key, _))) => {
                match committed_key.as_str().cmp(pending_key.as_str()) {
                    Ordering::Less => Source::Committed,
                    Ordering::Greater => Source::Pending,
                    Ordering::Equal => Source::Both,
                }
            }
        };

        match source {
            Source::Committed => self.committed.next(),
            Source::Pending => self.next_pending(),
            Source::Both => {
                self.committed.next();
                self.next_pending()
            }
        }
    }
}

impl MergedScan<'_> {
    fn next_pending(&mut self) -> Option<Result<KvPair, KVStoreError>> {
        self.pending
            .next()
            .map(|(key, value)| Ok((key.clone(), value.clone())))
    }
}
