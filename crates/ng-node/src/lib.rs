//! # Namegate Node Library
//!
//! This library exposes configuration and runtime wiring for testing.
//! The main entry point is the `main.rs` binary.

pub mod config;
pub mod runtime;

pub use config::{load_config, ConfigError, NodeConfig, StorageConfig};
pub use runtime::{NodeCoordinator, NodeRuntime};
