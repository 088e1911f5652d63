//! # File-Backed Ledger
//!
//! Persists the ordered world state to a single snapshot file so the ledger
//! survives restarts without an external database.
//!
//! ## Format
//!
//! The whole key space is written as one bincode-encoded
//! `BTreeMap<String, Vec<u8>>`. Every committed write rewrites the snapshot
//! through a temp file and an atomic rename.

use super::memory::InMemoryLedger;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{AtomicBatchWrite, BatchOperation, KeyValueStore, StateIterator};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed ordered key-value store.
#[derive(Debug)]
pub struct FileBackedLedger {
    state: InMemoryLedger,
    path: PathBuf,
}

impl FileBackedLedger {
    /// Open the ledger at `path`, loading the snapshot if one exists.
    ///
    /// A missing file is an empty ledger. A file that exists but cannot be
    /// decoded is reported as corruption rather than silently discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data: BTreeMap<String, Vec<u8>> =
                    bincode::deserialize(&bytes).map_err(|e| KVStoreError::Corruption {
                        message: format!("unreadable ledger snapshot {}: {}", path.display(), e),
                    })?;
                tracing::info!(
                    "[lot-registry] 💾 Loaded {} keys from {}",
                    data.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "[lot-registry] 📁 No ledger snapshot at {}, starting empty",
                    path.display()
                );
                BTreeMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                })
            }
        };

        Ok(Self {
            state: InMemoryLedger::from_entries(data),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of scan handles not yet released.
    pub fn open_scans(&self) -> usize {
        self.state.open_scans()
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        let io_err = |e: std::io::Error| KVStoreError::Io {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let bytes = bincode::serialize(self.state.entries()).map_err(|e| KVStoreError::Io {
            message: format!("failed to encode ledger snapshot: {}", e),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        tracing::debug!(
            "[lot-registry] Persisted {} keys to {}",
            self.state.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileBackedLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.state.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn scan(&self, start: &str, end: &str) -> Result<StateIterator<'_>, KVStoreError> {
        self.state.scan(start, end)
    }
}

impl AtomicBatchWrite for FileBackedLedger {
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Apply to a copy first so a failed save leaves memory and disk in step.
        let mut next = InMemoryLedger::from_entries(self.state.entries().clone());
        next.atomic_batch_write(operations)?;

        let previous = std::mem::replace(&mut self.state, next);
        if let Err(e) = self.save_to_file() {
            self.state = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileBackedLedger::open(dir.path().join("ledger.bin")).unwrap();

        assert!(ledger.get("lot1").unwrap().is_none());
        assert_eq!(ledger.scan("", "").unwrap().count(), 0);
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ledger.bin");

        {
            let mut ledger = FileBackedLedger::open(&path).unwrap();
            ledger.put("lot1", b"one").unwrap();
            ledger
                .atomic_batch_write(vec![
                    BatchOperation::put("lot2", b"two".to_vec()),
                    BatchOperation::put("lot3", b"three".to_vec()),
                ])
                .unwrap();
        }

        let ledger = FileBackedLedger::open(&path).unwrap();
        assert_eq!(ledger.get("lot1").unwrap(), Some(b"one".to_vec()));
        assert_eq!(ledger.get("lot3").unwrap(), Some(b"three".to_vec()));

        let keys: Vec<String> = ledger.scan("", "").unwrap().map(|e| e.unwrap().0).collect();
        assert_eq!(keys, vec!["lot1", "lot2", "lot3"]);
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");
        let mut ledger = FileBackedLedger::open(&path).unwrap();
        ledger.put("lot1", b"one").unwrap();

        // A directory at the temp path makes every save fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(ledger.put("lot1", b"changed").is_err());
        assert!(ledger.put("lot2", b"two").is_err());
        assert!(ledger
            .atomic_batch_write(vec![BatchOperation::put("lot3", b"three".to_vec())])
            .is_err());

        assert_eq!(ledger.get("lot1").unwrap(), Some(b"one".to_vec()));
        assert_eq!(ledger.get("lot2").unwrap(), None);
        assert_eq!(ledger.get("lot3").unwrap(), None);

        let reopened = FileBackedLedger::open(&path).unwrap();
        assert_eq!(reopened.get("lot1").unwrap(), Some(b"one".to_vec()));
        assert_eq!(reopened.get("lot2").unwrap(), None);
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");
        std::fs::write(&path, [0xFF; 3]).unwrap();

        let result = FileBackedLedger::open(&path);
        assert!(matches!(result, Err(KVStoreError::Corruption { .. })));
    }
}
