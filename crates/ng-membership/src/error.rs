//! Error types for the membership subsystem

use thiserror::Error;

/// Errors raised while constructing a membership filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),
}

/// Errors from name store adapters
///
/// Every failure of the durable store surfaces as `Unavailable`. The
/// coordinator never retries; retry policy belongs to the adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable during {operation}: {source}")]
    Unavailable {
        operation: &'static str,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O failure of the named store operation
    pub fn unavailable(operation: &'static str, source: std::io::Error) -> Self {
        StoreError::Unavailable { operation, source }
    }
}

/// Errors returned by a registration attempt
///
/// `AlreadyTaken` and `InvalidName` are caller-correctable. `StorageUnavailable`
/// means the append failed after the filter was mutated; the name keeps
/// reporting as taken until the filter is rebuilt from the store, so none of
/// these outcomes is retryable.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("username already taken: {0}")]
    AlreadyTaken(String),

    #[error("invalid username {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error(transparent)]
    StorageUnavailable(#[from] StoreError),
}
