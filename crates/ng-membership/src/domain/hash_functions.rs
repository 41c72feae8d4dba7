//! Probe hash functions for the membership filter
//!
//! A probe hasher maps `(item, probe_index)` to a 32-bit digest. Digests must
//! be reproducible across processes: the filter is rebuilt from the name store
//! on every start, and a name added in one process has to be found by the next.
//! Neither scheme uses a per-process random seed.

use std::io::Cursor;

/// FNV-1a 32-bit offset basis
const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
const FNV32_PRIME: u32 = 0x0100_0193;

/// Highest probe count the FNV scheme can distinguish (one suffix byte)
pub const MAX_FNV_PROBES: usize = 256;

/// Source of the `k` digests used to address filter bits
pub trait ProbeHasher: Send + Sync {
    /// Digest of `item` for one probe index
    fn digest(&self, item: &[u8], probe: u32) -> u32;

    /// Digests for probes `0..k`, in probe order
    ///
    /// Must agree with `digest` for every index. Implementations may override
    /// this to share work between probes.
    fn digests(&self, item: &[u8], k: usize) -> Vec<u32> {
        (0..k as u32).map(|probe| self.digest(item, probe)).collect()
    }
}

/// Fold `bytes` into a running FNV-1a 32-bit state
fn fnv1a_32_extend(mut hash: u32, bytes: &[u8]) -> u32 {
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV32_PRIME);
    }
    hash
}

/// Plain FNV-1a 32-bit hash of a byte string
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    fnv1a_32_extend(FNV32_OFFSET_BASIS, bytes)
}

/// Per-probe FNV-1a: hash of `item` followed by one byte holding the probe index
///
/// Rehashes the whole item for every probe. Probe indices wrap at 256, so
/// filters using this scheme must keep `k <= MAX_FNV_PROBES`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1aProbeHasher;

impl ProbeHasher for Fnv1aProbeHasher {
    fn digest(&self, item: &[u8], probe: u32) -> u32 {
        let hash = fnv1a_32(item);
        fnv1a_32_extend(hash, &[probe as u8])
    }

    fn digests(&self, item: &[u8], k: usize) -> Vec<u32> {
        // The item prefix is identical for every probe; only the suffix byte differs.
        let prefix = fnv1a_32(item);
        (0..k)
            .map(|probe| fnv1a_32_extend(prefix, &[probe as u8]))
            .collect()
    }
}

/// Hash an element with MurmurHash3 using a fixed seed
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);

    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Double hashing over two seeded MurmurHash3 digests: `h(i) = h1 + i * h2`
///
/// Hashes the item twice regardless of `k`, and has no cap on the probe count.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleHashProbeHasher;

impl DoubleHashProbeHasher {
    fn base_hashes(item: &[u8]) -> (u64, u64) {
        // Force h2 odd so successive probes never collapse onto h1
        (murmur_hash(item, 0), murmur_hash(item, 1) | 1)
    }

    fn combine(h1: u64, h2: u64, probe: u32) -> u32 {
        let hash = h1.wrapping_add(u64::from(probe).wrapping_mul(h2));
        (hash ^ (hash >> 32)) as u32
    }
}

impl ProbeHasher for DoubleHashProbeHasher {
    fn digest(&self, item: &[u8], probe: u32) -> u32 {
        let (h1, h2) = Self::base_hashes(item);
        Self::combine(h1, h2, probe)
    }

    fn digests(&self, item: &[u8], k: usize) -> Vec<u32> {
        let (h1, h2) = Self::base_hashes(item);
        (0..k as u32).map(|probe| Self::combine(h1, h2, probe)).collect()
    }
}
