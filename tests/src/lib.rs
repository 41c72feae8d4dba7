//! # Namegate Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-crate flows
//! │   ├── registration_flows.rs   # Coordinator + real stores
//! │   └── http_flows.rs           # Gateway + coordinator over HTTP
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ng-tests
//!
//! # By category
//! cargo test -p ng-tests integration::
//!
//! # Benchmarks
//! cargo bench -p ng-tests
//! ```

pub mod integration;
