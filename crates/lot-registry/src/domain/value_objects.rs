//! # Value Objects
//!
//! Configuration for the asset registry.

use crate::domain::entities::Lot;

/// Default upper bound on asset key length, in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = 256;

/// Configuration for the asset registry.
///
/// All values have sensible defaults; the default seed set is empty, which
/// makes `InitLedger` a no-op.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum asset key length accepted by Create (default: 256 bytes).
    pub max_key_len: usize,

    /// Lots written by `InitLedger`.
    pub seed_lots: Vec<Lot>,

    /// Log a warning when a created Lot's `total` disagrees with its
    /// products (default: true). `total` is never rewritten either way.
    pub warn_on_total_mismatch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_key_len: DEFAULT_MAX_KEY_LEN,
            seed_lots: Vec::new(),
            warn_on_total_mismatch: true,
        }
    }
}

impl RegistryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum key length.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Set the Lots written by `InitLedger`.
    pub fn with_seed_lots(mut self, seed_lots: Vec<Lot>) -> Self {
        self.seed_lots = seed_lots;
        self
    }

    /// Check an asset key against the configured rules.
    ///
    /// Returns the reason the key is rejected, if any.
    pub fn check_key(&self, id: &str) -> Option<String> {
        if id.is_empty() {
            return Some("key must not be empty".to_string());
        }
        if id.len() > self.max_key_len {
            return Some(format!(
                "key is {} bytes, max {} bytes",
                id.len(),
                self.max_key_len
            ));
        }
        None
    }
}
