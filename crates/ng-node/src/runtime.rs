//! # Node Runtime
//!
//! Wires the membership filter, the file-backed name store and the HTTP
//! gateway with explicit dependency injection.
//!
//! ## Startup Sequence
//!
//! 1. Build the filter from configuration
//! 2. Warm start: fold every stored name into the filter (failure is fatal)
//! 3. Serve HTTP until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use ng_gateway::GatewayService;
use ng_membership::{
    AtomicBloomFilter, FileNameStore, Metrics, RegistrationApi, RegistrationCoordinator,
};
use tracing::info;

use crate::config::NodeConfig;

/// Coordinator type the node runs with.
pub type NodeCoordinator = RegistrationCoordinator<AtomicBloomFilter, FileNameStore>;

/// The assembled service.
pub struct NodeRuntime {
    config: NodeConfig,
    coordinator: Arc<NodeCoordinator>,
    metrics: Arc<Metrics>,
}

impl NodeRuntime {
    /// Create the runtime. No I/O happens until [`NodeRuntime::start`].
    pub fn new(config: NodeConfig) -> Result<Self> {
        let filter = AtomicBloomFilter::from_config(&config.filter)
            .context("Invalid filter configuration")?;
        let store = FileNameStore::new(&config.storage.data_file);
        let metrics = Arc::new(Metrics::new());

        let coordinator = Arc::new(RegistrationCoordinator::with_metrics(
            Arc::new(filter),
            Arc::new(store),
            Arc::clone(&metrics),
        ));

        Ok(Self {
            config,
            coordinator,
            metrics,
        })
    }

    /// Rebuild the filter from the name store. Returns the names loaded.
    pub async fn start(&self) -> Result<usize> {
        info!("===========================================");
        info!("  Namegate Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let loaded = self
            .coordinator
            .warm_start()
            .await
            .with_context(|| {
                format!(
                    "Failed to load names from {}",
                    self.config.storage.data_file.display()
                )
            })?;

        let filter = self.coordinator.filter();
        info!(
            names = loaded,
            bits_set = filter.bits_set(),
            size_bits = filter.size_bits(),
            estimated_fpr = filter.false_positive_rate(),
            "Membership filter ready"
        );
        Ok(loaded)
    }

    /// Build the HTTP gateway in front of the coordinator.
    pub fn gateway(&self) -> Result<GatewayService> {
        let api: Arc<dyn RegistrationApi> = Arc::clone(&self.coordinator) as Arc<dyn RegistrationApi>;
        GatewayService::new(self.config.gateway.clone(), api, Arc::clone(&self.metrics))
            .context("Failed to create HTTP gateway")
    }

    /// Warm start, then serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.start().await?;
        let gateway = self.gateway()?;
        gateway.serve(shutdown).await.context("HTTP server failed")?;
        info!(metrics = ?self.metrics.snapshot(), "Node stopped");
        Ok(())
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn coordinator(&self) -> Arc<NodeCoordinator> {
        Arc::clone(&self.coordinator)
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }
}
