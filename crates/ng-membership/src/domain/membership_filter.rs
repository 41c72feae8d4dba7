//! Concurrent Bloom-style membership filter
//!
//! INVARIANTS:
//! - `m > 0` and `k >= 1`, fixed at construction
//! - Bits only ever go from 0 to 1, so `contains` after `add` is true forever
//!   (no false negatives)
//! - False positives are expected: FPR ≈ (1 - e^(-kn/m))^k after n insertions

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use bitvec::prelude::*;

use super::config::FilterConfig;
use super::hash_functions::{Fnv1aProbeHasher, ProbeHasher};
use super::parameters::calculate_fpr;
use crate::error::FilterError;

const WORD_BITS: usize = u64::BITS as usize;

/// Capability set of a membership backend
///
/// Both methods take `&self`; implementations must be safe to query while
/// another thread adds.
pub trait MembershipFilter: Send + Sync {
    /// Record `item`. Idempotent.
    fn add(&self, item: &str);

    /// `true` if `item` may have been added, `false` if it definitely was not
    fn contains(&self, item: &str) -> bool;
}

/// Bloom filter over a fixed array of atomic words
///
/// `add` sets bits with `fetch_or`, `contains` reads them with plain loads, so
/// readers never block. Only the digest footprint is stored; the filter cannot
/// enumerate or return the names it holds.
pub struct AtomicBloomFilter {
    /// Bit array, `ceil(m / 64)` words; bits at or past `m` stay clear
    words: Box<[AtomicU64]>,
    /// Size in bits (m)
    m: usize,
    /// Number of probes (k)
    k: usize,
    /// Number of `add` calls, duplicates included (n)
    n: AtomicUsize,
    hasher: Box<dyn ProbeHasher>,
}

impl AtomicBloomFilter {
    /// Create a filter with the default FNV-1a probe scheme
    ///
    /// # Panics
    /// Panics if `m == 0` or `k == 0`. Use [`AtomicBloomFilter::from_config`]
    /// for validated construction.
    pub fn new(m: usize, k: usize) -> Self {
        Self::with_hasher(m, k, Box::new(Fnv1aProbeHasher))
    }

    /// Create a filter with an explicit probe hasher
    ///
    /// # Panics
    /// Panics if `m == 0` or `k == 0`.
    pub fn with_hasher(m: usize, k: usize, hasher: Box<dyn ProbeHasher>) -> Self {
        assert!(m > 0, "filter size must be positive");
        assert!(k >= 1, "filter needs at least one probe");

        let word_count = m.div_ceil(WORD_BITS);
        Self {
            words: (0..word_count).map(|_| AtomicU64::new(0)).collect(),
            m,
            k,
            n: AtomicUsize::new(0),
            hasher,
        }
    }

    /// Create a filter from a validated configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self::with_hasher(
            config.size_bits,
            config.hash_count,
            config.scheme.hasher(),
        ))
    }

    /// Bit positions for `item`: `digest(item, i) mod m` for `i` in `0..k`
    fn bit_positions(&self, item: &str) -> impl Iterator<Item = usize> + '_ {
        self.hasher
            .digests(item.as_bytes(), self.k)
            .into_iter()
            .map(move |digest| digest as usize % self.m)
    }

    /// Estimated false positive rate at the current fill
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.elements_inserted(), self.k)
    }

    /// Point-in-time copy of the bit array
    ///
    /// Concurrent `add` calls may or may not be reflected.
    pub fn snapshot(&self) -> BitVec<u64, Lsb0> {
        let raw: Vec<u64> = self
            .words
            .iter()
            .map(|word| word.load(Ordering::Acquire))
            .collect();
        let mut bits = BitVec::<u64, Lsb0>::from_vec(raw);
        bits.truncate(self.m);
        bits
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.snapshot().count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of probes
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of `add` calls so far
    pub fn elements_inserted(&self) -> usize {
        self.n.load(Ordering::Relaxed)
    }
}

impl MembershipFilter for AtomicBloomFilter {
    fn add(&self, item: &str) {
        for pos in self.bit_positions(item) {
            let mask = 1u64 << (pos % WORD_BITS);
            self.words[pos / WORD_BITS].fetch_or(mask, Ordering::Release);
        }
        self.n.fetch_add(1, Ordering::Relaxed);
    }

    fn contains(&self, item: &str) -> bool {
        self.bit_positions(item).all(|pos| {
            let mask = 1u64 << (pos % WORD_BITS);
            self.words[pos / WORD_BITS].load(Ordering::Acquire) & mask != 0
        })
    }
}

impl std::fmt::Debug for AtomicBloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicBloomFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("n", &self.elements_inserted())
            .finish_non_exhaustive()
    }
}
