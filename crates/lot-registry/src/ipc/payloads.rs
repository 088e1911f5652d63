//! # IPC Payloads
//!
//! Wire types for registry invocations.
//!
//! A request names the exposed function and carries its arguments:
//!
//! ```text
//! {"function": "TransferAsset", "args": {"id": "lot1", "newOwner": "Alice", "newOwnerId": 7}}
//! ```
//!
//! A response is either `{"status": "ok", "payload": ...}` or
//! `{"status": "error", "kind": "NotFound", "message": "..."}`.

use crate::domain::entities::{null_as_empty, Lot, LotProduct};
use crate::domain::errors::{ErrorKind, RegistryError};
use crate::service::operations;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// An invocation of one exposed registry function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", content = "args")]
pub enum RegistryRequest {
    InitLedger,
    CreateAsset(CreateAssetArgs),
    ReadAsset(AssetIdArgs),
    AssetExists(AssetIdArgs),
    TransferAsset(TransferAssetArgs),
    GetAllAssets,
}

impl RegistryRequest {
    /// Name of the exposed function this request invokes.
    pub fn function_name(&self) -> &'static str {
        match self {
            RegistryRequest::InitLedger => operations::INIT_LEDGER,
            RegistryRequest::CreateAsset(_) => operations::CREATE_ASSET,
            RegistryRequest::ReadAsset(_) => operations::READ_ASSET,
            RegistryRequest::AssetExists(_) => operations::ASSET_EXISTS,
            RegistryRequest::TransferAsset(_) => operations::TRANSFER_ASSET,
            RegistryRequest::GetAllAssets => operations::GET_ALL_ASSETS,
        }
    }
}

/// Arguments of `CreateAsset`, one per Lot field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetArgs {
    pub id: String,
    pub nf_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lot_products: Vec<LotProduct>,
    pub owner: String,
    pub owner_id: i64,
    pub lot_type: String,
    pub created_at: String,
    pub total: i64,
    pub formated_address: String,
}

impl From<CreateAssetArgs> for Lot {
    fn from(args: CreateAssetArgs) -> Self {
        Lot {
            id: args.id,
            nf_id: args.nf_id,
            lot_products: args.lot_products,
            owner: args.owner,
            owner_id: args.owner_id,
            lot_type: args.lot_type,
            created_at: args.created_at,
            total: args.total,
            formated_address: args.formated_address,
            extensions: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdArgs {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAssetArgs {
    pub id: String,
    pub new_owner: String,
    pub new_owner_id: i64,
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RegistryResponse {
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<ResponsePayload>,
    },
    Error { kind: ErrorKind, message: String },
}

impl RegistryResponse {
    pub fn ok(payload: Option<ResponsePayload>) -> Self {
        RegistryResponse::Ok { payload }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        RegistryResponse::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RegistryResponse::Ok { .. })
    }

    /// The failure kind, if this is an error response.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RegistryResponse::Error { kind, .. } => Some(*kind),
            RegistryResponse::Ok { .. } => None,
        }
    }
}

impl From<RegistryError> for RegistryResponse {
    fn from(err: RegistryError) -> Self {
        RegistryResponse::error(err.kind(), err.to_string())
    }
}

/// Successful result values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Lot(Box<Lot>),
    Lots(Vec<Lot>),
    Exists(bool),
    Seeded(usize),
}
