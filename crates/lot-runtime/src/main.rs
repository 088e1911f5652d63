//! # Lot Runtime
//!
//! Entry point for the asset registry host. See the library docs for the
//! startup sequence and the request format.

use anyhow::{Context, Result};
use lot_registry::{
    AssetRegistry, AtomicBatchWrite, FileBackedLedger, InMemoryLedger, RegistryHandler,
};
use lot_runtime::{initialize_ledger, serve, RuntimeConfig};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout carries responses, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = RuntimeConfig::from_env().context("invalid runtime configuration")?;
    let registry_config = config
        .registry_config()
        .context("failed to build registry configuration")?;

    info!("===========================================");
    info!("  Lot Registry Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Seed lots: {}", registry_config.seed_lots.len());
    info!("===========================================");

    let handler = RegistryHandler::new(AssetRegistry::new(registry_config));

    match &config.data_path {
        Some(path) => {
            let mut ledger = FileBackedLedger::open(path)
                .with_context(|| format!("failed to open ledger at {}", path.display()))?;
            run(&handler, &mut ledger).await
        }
        None => {
            warn!("[lot-runtime] LOT_DATA_PATH not set, ledger is in-memory only");
            let mut ledger = InMemoryLedger::new();
            run(&handler, &mut ledger).await
        }
    }
}

async fn run<L: AtomicBatchWrite>(handler: &RegistryHandler, ledger: &mut L) -> Result<()> {
    initialize_ledger(handler, ledger)?;

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    tokio::select! {
        result = serve(handler, ledger, input, output) => {
            let stats = result?;
            info!(
                "[lot-runtime] Input closed after {} request(s), {} failed",
                stats.requests, stats.failures
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("[lot-runtime] Shutdown signal received");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
