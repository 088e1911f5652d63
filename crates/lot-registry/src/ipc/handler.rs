//! # Registry Handler
//!
//! Runs one `RegistryRequest` as one transaction.
//!
//! The handler opens a `TransactionContext` over the ledger, dispatches the
//! request to the registry, and commits only if the operation succeeded. A
//! failed operation leaves the ledger exactly as it was.

use crate::adapters::TransactionContext;
use crate::domain::errors::{ErrorKind, RegistryError};
use crate::ipc::payloads::{RegistryRequest, RegistryResponse, ResponsePayload};
use crate::ports::inbound::AssetRegistryApi;
use crate::ports::outbound::{AtomicBatchWrite, JsonLotCodec, LotCodec};
use crate::service::AssetRegistry;

/// Dispatches host requests to the asset registry.
pub struct RegistryHandler<C: LotCodec = JsonLotCodec> {
    registry: AssetRegistry<C>,
}

impl<C: LotCodec> RegistryHandler<C> {
    pub fn new(registry: AssetRegistry<C>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AssetRegistry<C> {
        &self.registry
    }

    /// Decode a request from raw bytes and run it.
    ///
    /// Bytes that do not decode as a request produce a `BadRequest` error
    /// response; the ledger is not touched.
    pub fn handle_bytes<L>(&self, ledger: &mut L, bytes: &[u8]) -> RegistryResponse
    where
        L: AtomicBatchWrite + ?Sized,
    {
        match serde_json::from_slice::<RegistryRequest>(bytes) {
            Ok(request) => self.handle(ledger, request),
            Err(e) => {
                tracing::warn!("[lot-registry] Rejected undecodable request: {}", e);
                RegistryResponse::error(ErrorKind::BadRequest, format!("invalid request: {}", e))
            }
        }
    }

    /// Run one request inside its own transaction.
    pub fn handle<L>(&self, ledger: &mut L, request: RegistryRequest) -> RegistryResponse
    where
        L: AtomicBatchWrite + ?Sized,
    {
        let function = request.function_name();
        let mut tx = TransactionContext::new(ledger);

        let payload = match self.dispatch(&mut tx, request) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("[lot-registry] {} failed: {}", function, err);
                return err.into();
            }
        };

        match tx.commit() {
            Ok(written) => {
                tracing::debug!("[lot-registry] {} committed {} write(s)", function, written);
                RegistryResponse::ok(payload)
            }
            Err(e) => {
                tracing::error!("[lot-registry] {} commit failed: {}", function, e);
                RegistryResponse::error(
                    ErrorKind::Storage,
                    format!("{}: failed to commit transaction: {}", function, e),
                )
            }
        }
    }

    fn dispatch<L>(
        &self,
        tx: &mut TransactionContext<'_, L>,
        request: RegistryRequest,
    ) -> Result<Option<ResponsePayload>, RegistryError>
    where
        L: AtomicBatchWrite + ?Sized,
    {
        let registry = &self.registry;

        match request {
            RegistryRequest::InitLedger => {
                let seeded = registry.init_ledger(tx)?;
                Ok(Some(ResponsePayload::Seeded(seeded)))
            }
            RegistryRequest::CreateAsset(args) => {
                registry.create_asset(tx, args.into())?;
                Ok(None)
            }
            RegistryRequest::ReadAsset(args) => {
                let lot = registry.read_asset(&*tx, &args.id)?;
                Ok(Some(ResponsePayload::Lot(Box::new(lot))))
            }
            RegistryRequest::AssetExists(args) => {
                let exists = registry.asset_exists(&*tx, &args.id)?;
                Ok(Some(ResponsePayload::Exists(exists)))
            }
            RegistryRequest::TransferAsset(args) => {
                registry.transfer_asset(tx, &args.id, &args.new_owner, args.new_owner_id)?;
                Ok(None)
            }
            RegistryRequest::GetAllAssets => {
                let lots = registry.get_all_assets(&*tx)?;
                Ok(Some(ResponsePayload::Lots(lots)))
            }
        }
    }
}
