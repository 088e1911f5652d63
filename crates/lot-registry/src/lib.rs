//! # Lot Asset Registry
//!
//! The asset registry is the authoritative owner of `Lot` records in the
//! ledger world state. Every Lot lives under its own `ID` key as a JSON
//! record.
//!
//! ## Architecture
//!
//! ```text
//! Host ──RegistryRequest──→ RegistryHandler ──→ TransactionContext ──→ Ledger
//!                              │                     ↑ (buffered writes,
//!                              ↓                     │  atomic commit)
//!                        AssetRegistry ──get/put/scan┘
//! ```
//!
//! The registry never holds a store handle. Every operation receives the
//! transaction-scoped store explicitly and performs at most one existence
//! check, one read and one write (or a single range scan for listing).
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique IDs | Create fails if the key already holds a value |
//! | 2 | Immutable ID | No operation rewrites a Lot's `ID` |
//! | 3 | Owner-only Transfer | Transfer changes `owner`/`ownerId` and nothing else |
//! | 4 | Faithful Reads | Read returns exactly what was last stored |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Lot entities, configuration and errors
//! - `ports/` - Inbound registry API, outbound store and codec traits
//! - `adapters/` - In-memory and file-backed ledgers, transaction context
//! - `service/` - `AssetRegistry` implementing the API
//! - `ipc/` - JSON request/response envelope and dispatcher
//!
//! ## Usage
//!
//! ```ignore
//! use lot_registry::{AssetRegistry, AssetRegistryApi, InMemoryLedger, RegistryConfig};
//!
//! let registry = AssetRegistry::new(RegistryConfig::default());
//! let mut ledger = InMemoryLedger::new();
//!
//! registry.create_asset(&mut ledger, lot)?;
//! registry.transfer_asset(&mut ledger, "lot1", "Alice", 7)?;
//! let stored = registry.read_asset(&ledger, "lot1")?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ipc;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::{FileBackedLedger, InMemoryLedger, TransactionContext};
pub use domain::entities::{Lot, LotProduct};
pub use domain::errors::{CodecError, ErrorKind, KVStoreError, RegistryError};
pub use domain::value_objects::RegistryConfig;
pub use ports::inbound::AssetRegistryApi;
pub use ports::outbound::{
    AtomicBatchWrite, BatchOperation, JsonLotCodec, KeyValueStore, KvPair, LotCodec,
    StateIterator,
};
pub use service::{AssetRegistry, LotIter};

pub use ipc::{RegistryHandler, RegistryRequest, RegistryResponse, ResponsePayload};
