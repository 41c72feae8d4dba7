//! Registration Coordinator
//!
//! Orchestrates the membership filter and the name store.
//!
//! ```text
//! Idle -> Checking -> Rejected(AlreadyTaken)
//!                  -> Mutating -> Persisting -> Committed
//!                                            -> Failed(StorageUnavailable)
//! ```
//!
//! Checks read the filter without locking. Registrations run one at a time
//! inside an exclusive section so that re-check, add and append are atomic
//! with respect to each other. The section runs on its own task: once the
//! filter is mutated, the append and its outcome are recorded even if the
//! caller stops waiting.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::domain::{validate_name, MembershipFilter};
use crate::error::{RegistrationError, StoreError};
use crate::metrics::Metrics;
use crate::ports::{NameStore, RegistrationApi};

/// Registration service implementation
///
/// Implements the `RegistrationApi` port using an injected filter and store.
pub struct RegistrationCoordinator<F: MembershipFilter, S: NameStore> {
    filter: Arc<F>,
    store: Arc<S>,
    /// Guards the re-check, add and append sequence
    registration: Arc<Mutex<()>>,
    metrics: Arc<Metrics>,
}

impl<F: MembershipFilter, S: NameStore> RegistrationCoordinator<F, S> {
    /// Create a new coordinator with its own metrics collector
    pub fn new(filter: Arc<F>, store: Arc<S>) -> Self {
        Self::with_metrics(filter, store, Arc::new(Metrics::new()))
    }

    /// Create a coordinator reporting into a shared metrics collector
    pub fn with_metrics(filter: Arc<F>, store: Arc<S>, metrics: Arc<Metrics>) -> Self {
        Self {
            filter,
            store,
            registration: Arc::new(Mutex::new(())),
            metrics,
        }
    }

    pub fn filter(&self) -> &Arc<F> {
        &self.filter
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

#[async_trait]
impl<F, S> RegistrationApi for RegistrationCoordinator<F, S>
where
    F: MembershipFilter + 'static,
    S: NameStore + 'static,
{
    async fn warm_start(&self) -> Result<usize, StoreError> {
        let names = self.store.load_all().await.map_err(|e| {
            error!(error = %e, "Warm start failed to load names");
            e
        })?;

        for name in &names {
            self.filter.add(name);
        }

        self.metrics.record_warm_start(names.len());
        info!(count = names.len(), "Warm start complete");
        Ok(names.len())
    }

    fn check_availability(&self, name: &str) -> bool {
        let start = Instant::now();
        let available = !self.filter.contains(name);
        self.metrics.record_check(start.elapsed(), available);
        available
    }

    async fn register(&self, name: &str) -> Result<(), RegistrationError> {
        if let Err(e) = validate_name(name) {
            self.metrics.record_invalid();
            debug!(error = %e, "Rejected registration");
            return Err(e);
        }

        let guard = Arc::clone(&self.registration).lock_owned().await;
        let filter = Arc::clone(&self.filter);
        let store = Arc::clone(&self.store);
        let metrics = Arc::clone(&self.metrics);
        let name = name.to_string();

        let section = tokio::spawn(async move {
            let _guard = guard;
            let start = Instant::now();

            if filter.contains(&name) {
                metrics.record_taken();
                debug!(username = %name, "Username already taken");
                return Err(RegistrationError::AlreadyTaken(name));
            }

            filter.add(&name);

            if let Err(e) = store.append(&name).await {
                metrics.record_storage_failure();
                error!(
                    username = %name,
                    error = %e,
                    "Failed to persist username; it reports as taken until restart"
                );
                return Err(e.into());
            }

            metrics.record_committed(start.elapsed());
            info!(username = %name, "Registered username");
            Ok(())
        });

        section.await.unwrap_or_else(|e| {
            self.metrics.record_storage_failure();
            error!(error = %e, "Registration section aborted");
            let source = io::Error::new(io::ErrorKind::Other, e.to_string());
            Err(StoreError::unavailable("register", source).into())
        })
    }
}
