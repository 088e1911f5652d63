//! # Domain Errors
//!
//! Error types for the asset registry.
//!
//! ## Design Principles
//!
//! - Every registry failure names the operation and the key it concerns
//! - Store failures are wrapped and re-signaled, never swallowed
//! - No panics in domain logic (use Result instead)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The asset key is unusable (empty or over the configured length).
    #[error("{operation}: invalid asset key {id:?}: {reason}")]
    InvalidKey {
        operation: &'static str,
        id: String,
        reason: String,
    },

    /// Create collided with a key that already holds a value.
    #[error("{operation}: the asset {id} already exists")]
    AlreadyExists { operation: &'static str, id: String },

    /// No value is stored under this key.
    #[error("{operation}: the asset {id} does not exist")]
    NotFound { operation: &'static str, id: String },

    /// The Lot could not be encoded into the record format.
    #[error("{operation}: failed to encode asset {id}: {source}")]
    Serialization {
        operation: &'static str,
        id: String,
        source: CodecError,
    },

    /// Stored bytes do not decode as a Lot (corruption or schema drift).
    #[error("{operation}: failed to decode asset {id}: {source}")]
    Deserialization {
        operation: &'static str,
        id: String,
        source: CodecError,
    },

    /// The underlying store call failed.
    #[error("{operation}: failed to access world state at {key:?}: {source}")]
    Storage {
        operation: &'static str,
        key: String,
        source: KVStoreError,
    },
}

impl RegistryError {
    /// Stable failure kind, used by the IPC envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidKey { .. } => ErrorKind::InvalidKey,
            RegistryError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::Serialization { .. } => ErrorKind::Serialization,
            RegistryError::Deserialization { .. } => ErrorKind::Deserialization,
            RegistryError::Storage { .. } => ErrorKind::Storage,
        }
    }

    /// The registry operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            RegistryError::InvalidKey { operation, .. }
            | RegistryError::AlreadyExists { operation, .. }
            | RegistryError::NotFound { operation, .. }
            | RegistryError::Serialization { operation, .. }
            | RegistryError::Deserialization { operation, .. }
            | RegistryError::Storage { operation, .. } => *operation,
        }
    }

    pub(crate) fn storage(
        operation: &'static str,
        key: impl Into<String>,
        source: KVStoreError,
    ) -> Self {
        RegistryError::Storage {
            operation,
            key: key.into(),
            source,
        }
    }
}

/// Failure kinds reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidKey,
    AlreadyExists,
    NotFound,
    Serialization,
    Deserialization,
    Storage,
    /// The request itself could not be decoded.
    BadRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Serialization => "Serialization",
            ErrorKind::Deserialization => "Deserialization",
            ErrorKind::Storage => "Storage",
            ErrorKind::BadRequest => "BadRequest",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    Corruption { message: String },

    /// Range scan with `start > end`.
    #[error("invalid scan range: start {start:?} is after end {end:?}")]
    InvalidRange { start: String, end: String },
}

/// Record encoding/decoding errors.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CodecError {
    pub message: String,
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError {
            message: err.to_string(),
        }
    }
}
