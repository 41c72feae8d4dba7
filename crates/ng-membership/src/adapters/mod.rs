//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the `NameStore` port.
//!
//! ## Adapters
//!
//! - `FileNameStore` - Append-only text file, one name per line
//! - `InMemoryNameStore` - Volatile store with failure injection

pub mod file_store;
pub mod memory_store;

pub use file_store::{FileNameStore, DEFAULT_DATA_FILE};
pub use memory_store::InMemoryNameStore;
