//! In-memory name store for tests and ephemeral nodes
//!
//! Failure toggles let tests drive the `StorageUnavailable` paths.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ports::outbound::NameStore;

/// Name store held in a `Vec`, lost on drop
#[derive(Debug, Default)]
pub struct InMemoryNameStore {
    names: Mutex<Vec<String>>,
    fail_loads: AtomicBool,
    fail_appends: AtomicBool,
}

impl InMemoryNameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `names`
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Mutex::new(names.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Make every subsequent `load_all` fail
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `append` fail
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Copy of the stored names, in append order
    pub fn names(&self) -> Vec<String> {
        self.names.lock().clone()
    }

    /// How many times `name` was stored
    pub fn count_of(&self, name: &str) -> usize {
        self.names.lock().iter().filter(|n| *n == name).count()
    }

    fn injected(operation: &'static str) -> StoreError {
        StoreError::unavailable(
            operation,
            io::Error::new(io::ErrorKind::Other, "injected failure"),
        )
    }
}

#[async_trait]
impl NameStore for InMemoryNameStore {
    async fn load_all(&self) -> Result<Vec<String>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::injected("load"));
        }
        Ok(self.names())
    }

    async fn append(&self, name: &str) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Self::injected("append"));
        }
        self.names.lock().push(name.to_string());
        Ok(())
    }
}
