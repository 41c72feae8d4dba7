//! # Namegate Node
//!
//! Entry point for the username availability service.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults + `NG_*` environment)
//! 3. Wire filter, name store, coordinator and gateway
//! 4. Warm start from the name file; abort on failure
//! 5. Serve until Ctrl-C

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ng_node::{load_config, NodeRuntime};

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = load_config().context("Invalid configuration")?;
    let runtime = NodeRuntime::new(config)?;

    runtime.run(shutdown_signal()).await
}
