//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Probe hash functions
//! - The concurrent membership filter
//! - Parameter calculations
//! - Configuration
//! - Registrable name rules
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod config;
pub mod hash_functions;
pub mod membership_filter;
pub mod name;
pub mod parameters;

pub use config::{FilterConfig, FilterConfigBuilder, HashScheme, MAX_SIZE_BITS};
pub use hash_functions::{
    fnv1a_32, DoubleHashProbeHasher, Fnv1aProbeHasher, ProbeHasher, MAX_FNV_PROBES,
};
pub use membership_filter::{AtomicBloomFilter, MembershipFilter};
pub use name::{validate_name, MAX_NAME_BYTES};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, FilterParameters};
