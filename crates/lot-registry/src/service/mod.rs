//! # Asset Registry Service
//!
//! The main service implementing the registry API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `AssetRegistryApi` for create/read/transfer/list
//! 2. Enforces the ID uniqueness and owner-only transfer invariants
//! 3. Uses dependency injection for the record codec
//!
//! It owns no store. Callers pass the transaction-scoped store into every
//! operation.

mod registry;

use crate::domain::entities::Lot;
use crate::domain::errors::RegistryError;
use crate::domain::value_objects::RegistryConfig;
use crate::ports::outbound::{JsonLotCodec, KeyValueStore, LotCodec, StateIterator};

/// Operation names used in error context and logs.
pub mod operations {
    pub const INIT_LEDGER: &str = "InitLedger";
    pub const CREATE_ASSET: &str = "CreateAsset";
    pub const READ_ASSET: &str = "ReadAsset";
    pub const ASSET_EXISTS: &str = "AssetExists";
    pub const TRANSFER_ASSET: &str = "TransferAsset";
    pub const GET_ALL_ASSETS: &str = "GetAllAssets";
}

/// The asset registry.
pub struct AssetRegistry<C: LotCodec = JsonLotCodec> {
    /// Record codec for Lot encoding/decoding.
    pub(crate) codec: C,
    /// Service configuration.
    pub(crate) config: RegistryConfig,
}

impl AssetRegistry<JsonLotCodec> {
    /// Create a registry using the JSON record format.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_codec(JsonLotCodec, config)
    }
}

impl Default for AssetRegistry<JsonLotCodec> {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl<C: LotCodec> AssetRegistry<C> {
    /// Create a registry with a custom record codec.
    pub fn with_codec(codec: C, config: RegistryConfig) -> Self {
        Self { codec, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Lazily walk every Lot in the namespace, in store key order.
    ///
    /// Each call opens a fresh scan. The iterator yields the first failure
    /// it meets and then stops; the scan is released as soon as the
    /// iterator finishes or is dropped.
    pub fn iter_all<'s, S>(&'s self, ctx: &'s S) -> Result<LotIter<'s, C>, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let scan = ctx
            .scan("", "")
            .map_err(|e| RegistryError::storage(operations::GET_ALL_ASSETS, "", e))?;

        Ok(LotIter {
            scan: Some(scan),
            codec: &self.codec,
        })
    }
}

/// Lazy sequence of decoded Lots over one range scan.
pub struct LotIter<'a, C: LotCodec> {
    scan: Option<StateIterator<'a>>,
    codec: &'a C,
}

impl<C: LotCodec> LotIter<'_, C> {
    fn finish(&mut self) {
        if let Some(scan) = self.scan.take() {
            scan.close();
        }
    }
}

impl<C: LotCodec> Iterator for LotIter<'_, C> {
    type Item = Result<Lot, RegistryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let scan = self.scan.as_mut()?;

        let item = match scan.next() {
            None => {
                self.finish();
                return None;
            }
            Some(Err(e)) => Err(RegistryError::storage(operations::GET_ALL_ASSETS, "", e)),
            Some(Ok((key, value))) => {
                self.codec
                    .decode(&value)
                    .map_err(|source| RegistryError::Deserialization {
                        operation: operations::GET_ALL_ASSETS,
                        id: key,
                        source,
                    })
            }
        };

        if item.is_err() {
            self.finish();
        }
        Some(item)
    }
}
