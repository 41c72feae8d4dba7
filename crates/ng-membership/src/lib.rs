//! # ng-membership
//!
//! Username availability core: a concurrent Bloom-style membership filter
//! gating an append-only registry of confirmed names.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `AtomicBloomFilter`: Lock-free probabilistic membership
//!   - `ProbeHasher`: FNV-1a and double-Murmur probe schemes
//!   - `FilterConfig` / `FilterConfigBuilder`: Sizing with validation
//!   - `validate_name`: What may be registered
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `RegistrationApi`: Driving port (inbound API)
//!   - `NameStore`: Driven port (durable storage)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `RegistrationCoordinator`: Implements `RegistrationApi`
//!
//! - **Adapters Layer** (`adapters/`): Storage backends
//!   - `FileNameStore`: One name per line, fsynced on append
//!   - `InMemoryNameStore`: Volatile, with failure injection
//!
//! ## Invariants
//!
//! - **No false negatives**: once `add(x)` returns, `contains(x)` is true
//! - **Durability**: a name is persisted before `register` reports success
//! - **Serialized registration**: `C` concurrent `register(x)` calls commit
//!   exactly once
//! - **Bounded error**: FPR ≈ (1 - e^(-kn/m))^k; a false positive only ever
//!   refuses a free name
//!
//! ## Usage Example
//!
//! ```ignore
//! use ng_membership::{
//!     AtomicBloomFilter, FileNameStore, RegistrationApi, RegistrationCoordinator,
//! };
//! use std::sync::Arc;
//!
//! let filter = Arc::new(AtomicBloomFilter::new(1_000_000, 3));
//! let store = Arc::new(FileNameStore::new("data/users.txt"));
//! let coordinator = RegistrationCoordinator::new(filter, store);
//!
//! coordinator.warm_start().await?;
//! if coordinator.check_availability("alice") {
//!     coordinator.register("alice").await?;
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FileNameStore, InMemoryNameStore, DEFAULT_DATA_FILE};
pub use domain::{
    validate_name, AtomicBloomFilter, FilterConfig, FilterConfigBuilder, HashScheme,
    MembershipFilter, ProbeHasher, MAX_NAME_BYTES,
};
pub use error::{FilterError, RegistrationError, StoreError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{NameStore, RegistrationApi};
pub use service::RegistrationCoordinator;
