//! # Asset Registry API Implementation
//!
//! Implements the AssetRegistryApi trait.

use super::operations::*;
use super::AssetRegistry;
use crate::domain::entities::Lot;
use crate::domain::errors::RegistryError;
use crate::ports::inbound::AssetRegistryApi;
use crate::ports::outbound::{KeyValueStore, LotCodec};

impl<C: LotCodec> AssetRegistryApi for AssetRegistry<C> {
    fn init_ledger<S>(&self, ctx: &mut S) -> Result<usize, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        for lot in &self.config.seed_lots {
            if let Some(reason) = self.config.check_key(&lot.id) {
                return Err(RegistryError::InvalidKey {
                    operation: INIT_LEDGER,
                    id: lot.id.clone(),
                    reason,
                });
            }
        }

        for lot in &self.config.seed_lots {
            self.write_lot(INIT_LEDGER, ctx, &lot.id, lot)?;
        }

        tracing::info!(
            "[lot-registry] Seeded {} lot(s) into world state",
            self.config.seed_lots.len()
        );
        Ok(self.config.seed_lots.len())
    }

    fn create_asset<S>(&self, ctx: &mut S, lot: Lot) -> Result<(), RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        if let Some(reason) = self.config.check_key(&lot.id) {
            return Err(RegistryError::InvalidKey {
                operation: CREATE_ASSET,
                id: lot.id,
                reason,
            });
        }

        if self.exists(CREATE_ASSET, &*ctx, &lot.id)? {
            return Err(RegistryError::AlreadyExists {
                operation: CREATE_ASSET,
                id: lot.id,
            });
        }

        if self.config.warn_on_total_mismatch && !lot.total_matches_products() {
            tracing::warn!(
                "[lot-registry] Lot {} declares total {} but its products sum to {:?}",
                lot.id,
                lot.total,
                lot.products_value()
            );
        }

        self.write_lot(CREATE_ASSET, ctx, &lot.id, &lot)?;

        tracing::info!(
            "[lot-registry] 📦 Created lot {} (owner {}, {} products)",
            lot.id,
            lot.owner_id,
            lot.lot_products.len()
        );
        Ok(())
    }

    fn read_asset<S>(&self, ctx: &S, id: &str) -> Result<Lot, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.read_lot(READ_ASSET, ctx, id)
    }

    fn asset_exists<S>(&self, ctx: &S, id: &str) -> Result<bool, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.exists(ASSET_EXISTS, ctx, id)
    }

    fn transfer_asset<S>(
        &self,
        ctx: &mut S,
        id: &str,
        new_owner: &str,
        new_owner_id: i64,
    ) -> Result<(), RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut lot = self.read_lot(TRANSFER_ASSET, &*ctx, id)?;
        let previous_owner_id = lot.owner_id;

        lot.transfer_to(new_owner, new_owner_id);
        // Written back under the requested key, whatever the record's own `ID` says.
        self.write_lot(TRANSFER_ASSET, ctx, id, &lot)?;

        tracing::info!(
            "[lot-registry] ✓ Lot {} transferred: owner {} -> {}",
            id,
            previous_owner_id,
            new_owner_id
        );
        Ok(())
    }

    fn get_all_assets<S>(&self, ctx: &S) -> Result<Vec<Lot>, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let lots = self.iter_all(ctx)?.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("[lot-registry] Listed {} lot(s)", lots.len());
        Ok(lots)
    }
}

impl<C: LotCodec> AssetRegistry<C> {
    /// Presence of bytes under `id`. The value is never decoded.
    fn exists<S>(
        &self,
        operation: &'static str,
        ctx: &S,
        id: &str,
    ) -> Result<bool, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        ctx.get(id)
            .map(|value| value.is_some())
            .map_err(|e| RegistryError::storage(operation, id, e))
    }

    fn read_lot<S>(
        &self,
        operation: &'static str,
        ctx: &S,
        id: &str,
    ) -> Result<Lot, RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let data = ctx
            .get(id)
            .map_err(|e| RegistryError::storage(operation, id, e))?
            .ok_or_else(|| RegistryError::NotFound {
                operation,
                id: id.to_string(),
            })?;

        self.codec
            .decode(&data)
            .map_err(|source| RegistryError::Deserialization {
                operation,
                id: id.to_string(),
                source,
            })
    }

    fn write_lot<S>(
        &self,
        operation: &'static str,
        ctx: &mut S,
        key: &str,
        lot: &Lot,
    ) -> Result<(), RegistryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let data = self
            .codec
            .encode(lot)
            .map_err(|source| RegistryError::Serialization {
                operation,
                id: key.to_string(),
                source,
            })?;

        ctx.put(key, &data)
            .map_err(|e| RegistryError::storage(operation, key, e))
    }
}
