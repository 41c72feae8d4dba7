//! Optimal filter sizing
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal probe count

use std::f64::consts::LN_2;

/// Filter sizing parameters
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParameters {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of probes per item (k)
    pub hash_count: usize,
    /// False positive rate expected once the anticipated names are inserted
    pub expected_fpr: f64,
}

/// Calculate optimal filter parameters for an anticipated name count
///
/// # Arguments
/// * `expected_names` - Total names the filter should hold (n)
/// * `target_fpr` - Acceptable false positive rate at that load
pub fn calculate_optimal_parameters(expected_names: usize, target_fpr: f64) -> FilterParameters {
    if expected_names == 0 {
        return FilterParameters {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let n = expected_names as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = ((-n * target_fpr.ln() / ln2_squared).ceil() as usize).max(1);

    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(1, 32);

    FilterParameters {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, expected_names, k),
    }
}

/// False positive probability after `n` insertions into `m` bits with `k` probes
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
