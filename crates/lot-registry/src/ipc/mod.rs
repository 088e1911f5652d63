//! # IPC Layer
//!
//! Request/response envelope for invoking the registry from a host.
//!
//! - `payloads` - `RegistryRequest` / `RegistryResponse` wire types
//! - `handler` - Dispatches one request inside one transaction

pub mod handler;
pub mod payloads;

pub use handler::RegistryHandler;
pub use payloads::{
    AssetIdArgs, CreateAssetArgs, RegistryRequest, RegistryResponse, ResponsePayload,
    TransferAssetArgs,
};
