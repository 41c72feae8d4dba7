//! Inbound Ports (Driving Ports)
//!
//! The transport-agnostic API that the HTTP gateway (or any other caller)
//! drives.

use async_trait::async_trait;

use crate::error::{RegistrationError, StoreError};

/// Primary registration API (Driving Port)
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Fold every stored name into the filter
    ///
    /// Must complete before the first check or register. Returns the number
    /// of names loaded. A failure here is fatal to startup.
    async fn warm_start(&self) -> Result<usize, StoreError>;

    /// `true` if `name` is definitely unregistered
    ///
    /// Advisory only: never blocks and never fails. A `true` answer can be
    /// invalidated by a concurrent registration.
    fn check_availability(&self, name: &str) -> bool;

    /// Claim `name`
    ///
    /// # Errors
    /// - `AlreadyTaken` if the filter already reports the name (possibly a
    ///   false positive)
    /// - `InvalidName` if the name cannot be persisted
    /// - `StorageUnavailable` if the durable append failed
    async fn register(&self, name: &str) -> Result<(), RegistrationError>;
}
