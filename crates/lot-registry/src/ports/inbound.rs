//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the asset registry.
//!
//! Every method takes the transaction-scoped store as an explicit argument.
//! Implementations hold no store handle between calls.

use crate::domain::entities::Lot;
use crate::domain::errors::RegistryError;
use crate::ports::outbound::KeyValueStore;

/// Primary API for the asset registry.
pub trait AssetRegistryApi {
    /// Seed the namespace with the configured initial Lots.
    ///
    /// Seeds are written with an overwriting put, so re-running is harmless.
    /// Returns the number of Lots written.
    fn init_ledger<S>(&self, ctx: &mut S) -> Result<usize, RegistryError>
    where
        S: KeyValueStore + ?Sized;

    /// Store a new Lot under `lot.id`.
    ///
    /// ## Errors
    ///
    /// - `InvalidKey`: `lot.id` is empty or too long
    /// - `AlreadyExists`: a value is already stored under `lot.id`
    /// - `Serialization`: the Lot could not be encoded
    /// - `Storage`: the existence check or the write failed
    fn create_asset<S>(&self, ctx: &mut S, lot: Lot) -> Result<(), RegistryError>
    where
        S: KeyValueStore + ?Sized;

    /// Read the Lot stored under `id`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: nothing is stored under `id`
    /// - `Deserialization`: the stored bytes are not a Lot
    /// - `Storage`: the read failed
    fn read_asset<S>(&self, ctx: &S, id: &str) -> Result<Lot, RegistryError>
    where
        S: KeyValueStore + ?Sized;

    /// Whether any bytes are stored under `id`. Never decodes.
    fn asset_exists<S>(&self, ctx: &S, id: &str) -> Result<bool, RegistryError>
    where
        S: KeyValueStore + ?Sized;

    /// Hand the Lot under `id` to a new owner.
    ///
    /// Only `owner` and `owner_id` change.
    ///
    /// ## Errors
    ///
    /// Everything `read_asset` can return, plus `Serialization` and
    /// `Storage` for the write-back.
    fn transfer_asset<S>(
        &self,
        ctx: &mut S,
        id: &str,
        new_owner: &str,
        new_owner_id: i64,
    ) -> Result<(), RegistryError>
    where
        S: KeyValueStore + ?Sized;

    /// Every Lot in the namespace, in store key order.
    ///
    /// Fails on the first record that does not decode.
    fn get_all_assets<S>(&self, ctx: &S) -> Result<Vec<Lot>, RegistryError>
    where
        S: KeyValueStore + ?Sized;
}
