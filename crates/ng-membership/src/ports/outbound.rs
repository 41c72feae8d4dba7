//! Outbound Ports (Driven Ports)
//!
//! Durable storage the registration flow depends on.

use async_trait::async_trait;

use crate::error::StoreError;

/// Durable, append-only record of every committed name (Driven Port)
///
/// The store is the source of truth; the membership filter is rebuilt from it
/// at startup.
#[async_trait]
pub trait NameStore: Send + Sync {
    /// Every name previously appended, in append order
    ///
    /// A missing backing resource means zero names, not an error.
    async fn load_all(&self) -> Result<Vec<String>, StoreError>;

    /// Persist one name
    ///
    /// Must not return `Ok` until the name survives a process restart.
    async fn append(&self, name: &str) -> Result<(), StoreError>;
}
