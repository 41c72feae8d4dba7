//! Filter configuration and validation
//!
//! Size and probe count are fixed for the process lifetime. Changing either
//! means building a fresh filter and warm-starting it from the name store.
//!
//! # Example
//!
//! ```ignore
//! use ng_membership::domain::{FilterConfigBuilder, HashScheme};
//!
//! let config = FilterConfigBuilder::new()
//!     .expected_names(1_000_000)
//!     .target_fpr(0.001)
//!     .scheme(HashScheme::DoubleMurmur)
//!     .build()?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hash_functions::{
    DoubleHashProbeHasher, Fnv1aProbeHasher, ProbeHasher, MAX_FNV_PROBES,
};
use super::parameters::calculate_optimal_parameters;
use crate::error::FilterError;

/// Digests are 32-bit, so bits past 2^32 could never be addressed
pub const MAX_SIZE_BITS: u64 = 1 << 32;

/// Probe hash scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashScheme {
    /// FNV-1a over the item plus a probe-index byte
    #[default]
    Fnv1a,
    /// `h1 + i*h2` over two MurmurHash3 digests
    DoubleMurmur,
}

impl HashScheme {
    /// Build the hasher for this scheme
    pub fn hasher(self) -> Box<dyn ProbeHasher> {
        match self {
            HashScheme::Fnv1a => Box::new(Fnv1aProbeHasher),
            HashScheme::DoubleMurmur => Box::new(DoubleHashProbeHasher),
        }
    }

    /// Largest probe count the scheme supports
    pub fn max_hash_count(self) -> usize {
        match self {
            HashScheme::Fnv1a => MAX_FNV_PROBES,
            HashScheme::DoubleMurmur => usize::MAX,
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashScheme::Fnv1a => f.write_str("fnv1a"),
            HashScheme::DoubleMurmur => f.write_str("double_murmur"),
        }
    }
}

impl FromStr for HashScheme {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fnv1a" | "fnv" => Ok(HashScheme::Fnv1a),
            "double_murmur" | "murmur" => Ok(HashScheme::DoubleMurmur),
            other => Err(FilterError::InvalidParameters(format!(
                "unknown hash scheme {:?}",
                other
            ))),
        }
    }
}

/// Construction-time filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Bit array length (m)
    pub size_bits: usize,
    /// Probes per item (k)
    pub hash_count: usize,
    /// Probe hash scheme
    pub scheme: HashScheme,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size_bits: 1_000_000,
            hash_count: 3,
            scheme: HashScheme::Fnv1a,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(size_bits: usize, hash_count: usize, scheme: HashScheme) -> Result<Self, FilterError> {
        let config = Self {
            size_bits,
            hash_count,
            scheme,
        };
        config.validate()?;
        Ok(config)
    }

    /// Size the filter for an anticipated name count and acceptable FPR
    pub fn for_capacity(
        expected_names: usize,
        target_fpr: f64,
        scheme: HashScheme,
    ) -> Result<Self, FilterError> {
        if expected_names == 0 {
            return Err(FilterError::InvalidParameters(
                "expected_names cannot be 0".to_string(),
            ));
        }
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "target_fpr must be in (0, 1), got {}",
                target_fpr
            )));
        }

        let params = calculate_optimal_parameters(expected_names, target_fpr);
        Self::new(params.size_bits, params.hash_count, scheme)
    }

    /// Validate `m > 0`, `k >= 1` and the scheme's probe limit
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.size_bits == 0 {
            return Err(FilterError::InvalidParameters(
                "size_bits cannot be 0".to_string(),
            ));
        }

        if self.size_bits as u64 > MAX_SIZE_BITS {
            return Err(FilterError::InvalidParameters(format!(
                "size_bits {} exceeds addressable maximum {}",
                self.size_bits, MAX_SIZE_BITS
            )));
        }

        if self.hash_count == 0 {
            return Err(FilterError::InvalidParameters(
                "hash_count cannot be 0".to_string(),
            ));
        }

        if self.hash_count > self.scheme.max_hash_count() {
            return Err(FilterError::InvalidParameters(format!(
                "hash_count {} exceeds {} limit of {}",
                self.hash_count,
                self.scheme,
                self.scheme.max_hash_count()
            )));
        }

        Ok(())
    }
}

/// Builder for FilterConfig with validation
///
/// Either set `size_bits`/`hash_count` directly, or set `expected_names` and
/// `target_fpr` to derive them. Explicit values win over derived ones.
#[derive(Default)]
pub struct FilterConfigBuilder {
    size_bits: Option<usize>,
    hash_count: Option<usize>,
    scheme: Option<HashScheme>,
    expected_names: Option<usize>,
    target_fpr: Option<f64>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bit array length
    pub fn size_bits(mut self, bits: usize) -> Self {
        self.size_bits = Some(bits);
        self
    }

    /// Set the probe count
    pub fn hash_count(mut self, k: usize) -> Self {
        self.hash_count = Some(k);
        self
    }

    /// Set the probe hash scheme
    pub fn scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Set the anticipated total number of names
    pub fn expected_names(mut self, n: usize) -> Self {
        self.expected_names = Some(n);
        self
    }

    /// Set the acceptable false positive rate at `expected_names`
    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let scheme = self.scheme.unwrap_or_default();

        let mut config = match (self.expected_names, self.target_fpr) {
            (Some(n), Some(fpr)) => FilterConfig::for_capacity(n, fpr, scheme)?,
            (None, None) => FilterConfig {
                scheme,
                ..FilterConfig::default()
            },
            _ => {
                return Err(FilterError::InvalidParameters(
                    "expected_names and target_fpr must be set together".to_string(),
                ))
            }
        };

        if let Some(bits) = self.size_bits {
            config.size_bits = bits;
        }
        if let Some(k) = self.hash_count {
            config.hash_count = k;
        }

        config.validate()?;
        Ok(config)
    }
}
