//! # Runtime Configuration
//!
//! Defaults overridden by `LOT_*` environment variables.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `LOT_DATA_PATH` | Ledger snapshot file; unset means an in-memory ledger |
//! | `LOT_SEED_FILE` | JSON array of Lots written by `InitLedger` |
//! | `LOT_MAX_KEY_LEN` | Maximum asset key length accepted by `CreateAsset` |

use lot_registry::domain::value_objects::DEFAULT_MAX_KEY_LEN;
use lot_registry::{Lot, RegistryConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DATA_PATH: &str = "LOT_DATA_PATH";
pub const ENV_SEED_FILE: &str = "LOT_SEED_FILE";
pub const ENV_MAX_KEY_LEN: &str = "LOT_MAX_KEY_LEN";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("seed file {path} is not a JSON array of lots: {source}")]
    SeedFileParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Ledger snapshot path. `None` keeps the ledger in memory.
    pub data_path: Option<PathBuf>,
    /// Seed file for `InitLedger`.
    pub seed_file: Option<PathBuf>,
    /// Maximum asset key length.
    pub max_key_len: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            seed_file: None,
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.is_empty()) {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup(ENV_SEED_FILE).filter(|v| !v.is_empty()) {
            config.seed_file = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup(ENV_MAX_KEY_LEN) {
            config.max_key_len = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: ENV_MAX_KEY_LEN,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    /// Build the registry configuration, reading the seed file if one is set.
    pub fn registry_config(&self) -> Result<RegistryConfig, ConfigError> {
        let seed_lots = match &self.seed_file {
            Some(path) => load_seed_file(path)?,
            None => Vec::new(),
        };

        Ok(RegistryConfig::new()
            .with_max_key_len(self.max_key_len)
            .with_seed_lots(seed_lots))
    }
}

/// Read a JSON array of Lots.
pub fn load_seed_file(path: &Path) -> Result<Vec<Lot>, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::SeedFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ConfigError::SeedFileParse {
        path: path.to_path_buf(),
        source,
    })
}
