//! # Lot Runtime
//!
//! Hosts the asset registry as a line-oriented service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`, to stderr)
//! 2. Load configuration from `LOT_*` environment variables
//! 3. Open the ledger (file-backed if `LOT_DATA_PATH` is set)
//! 4. Run `InitLedger`
//! 5. Serve one JSON request per stdin line, one JSON response per stdout line
//!
//! Each request runs in its own transaction; see `RegistryHandler`.

pub mod config;

use anyhow::{bail, Context, Result};
use lot_registry::{AtomicBatchWrite, LotCodec, RegistryHandler, RegistryRequest, RegistryResponse};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

pub use config::{ConfigError, RuntimeConfig};

/// Counters for one serving session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: u64,
    pub failures: u64,
}

/// Run `InitLedger` once before serving.
pub fn initialize_ledger<L, C>(handler: &RegistryHandler<C>, ledger: &mut L) -> Result<()>
where
    L: AtomicBatchWrite + ?Sized,
    C: LotCodec,
{
    match handler.handle(ledger, RegistryRequest::InitLedger) {
        RegistryResponse::Ok { .. } => {
            info!("[lot-runtime] Ledger initialized");
            Ok(())
        }
        RegistryResponse::Error { kind, message } => {
            bail!("InitLedger failed ({}): {}", kind, message)
        }
    }
}

/// Serve JSON-line requests until `input` is exhausted.
///
/// Blank lines are skipped. Request failures are reported in the response
/// stream and do not stop the loop; only I/O failures on the streams do.
pub async fn serve<R, W, L, C>(
    handler: &RegistryHandler<C>,
    ledger: &mut L,
    input: R,
    mut output: W,
) -> Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: AtomicBatchWrite + ?Sized,
    C: LotCodec,
{
    let mut stats = ServeStats::default();
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read request line")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handler.handle_bytes(ledger, line.as_bytes());
        stats.requests += 1;
        if !response.is_ok() {
            stats.failures += 1;
        }

        let mut encoded = serde_json::to_vec(&response).context("failed to encode response")?;
        encoded.push(b'\n');
        output
            .write_all(&encoded)
            .await
            .context("failed to write response")?;
        output.flush().await.context("failed to flush response")?;
    }

    Ok(stats)
}
