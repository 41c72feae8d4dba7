//! Counters for availability checks and registrations
//!
//! Provides instrumentation points for monitoring the registration flow.
//! The gateway serves [`MetricsSnapshot`] as JSON.
//!
//! ## Usage
//!
//! ```ignore
//! use ng_membership::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//!
//! let start = std::time::Instant::now();
//! let available = filter.contains(name);
//! metrics.record_check(start.elapsed(), !available);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Metrics collector for the registration flow
///
/// Thread-safe counters, updated without locks.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total availability checks
    pub checks_performed: AtomicU64,
    /// Checks that answered "available"
    pub checks_available: AtomicU64,
    /// Cumulative check time in nanoseconds
    pub check_time_ns: AtomicU64,
    /// Names committed to filter and store
    pub registrations_committed: AtomicU64,
    /// Registrations rejected as already taken
    pub registrations_taken: AtomicU64,
    /// Registrations rejected by name validation
    pub registrations_invalid: AtomicU64,
    /// Appends that failed after the filter was mutated
    pub storage_failures: AtomicU64,
    /// Cumulative time spent inside the exclusive registration section
    pub register_time_ns: AtomicU64,
    /// Names folded in by the last warm start
    pub names_warmed: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an availability check
    ///
    /// # Arguments
    /// * `duration` - Time taken for the filter query
    /// * `available` - Whether the name was reported available
    pub fn record_check(&self, duration: Duration, available: bool) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        self.check_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if available {
            self.checks_available.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a committed registration
    pub fn record_committed(&self, duration: Duration) {
        self.registrations_committed.fetch_add(1, Ordering::Relaxed);
        self.register_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record an `AlreadyTaken` rejection
    pub fn record_taken(&self) {
        self.registrations_taken.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an `InvalidName` rejection
    pub fn record_invalid(&self) {
        self.registrations_invalid.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed append
    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the size of a completed warm start
    pub fn record_warm_start(&self, names: usize) {
        self.names_warmed.store(names as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_available: self.checks_available.load(Ordering::Relaxed),
            registrations_committed: self.registrations_committed.load(Ordering::Relaxed),
            registrations_taken: self.registrations_taken.load(Ordering::Relaxed),
            registrations_invalid: self.registrations_invalid.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            names_warmed: self.names_warmed.load(Ordering::Relaxed),
            avg_check_ns: self.avg_check_time_ns(),
            avg_register_ns: self.avg_register_time_ns(),
        }
    }

    /// Calculate average check time in nanoseconds
    pub fn avg_check_time_ns(&self) -> u64 {
        let total = self.check_time_ns.load(Ordering::Relaxed);
        let count = self.checks_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average commit time in nanoseconds
    pub fn avg_register_time_ns(&self) -> u64 {
        let total = self.register_time_ns.load(Ordering::Relaxed);
        let count = self.registrations_committed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub checks_performed: u64,
    pub checks_available: u64,
    pub registrations_committed: u64,
    pub registrations_taken: u64,
    pub registrations_invalid: u64,
    pub storage_failures: u64,
    pub names_warmed: u64,
    pub avg_check_ns: u64,
    pub avg_register_ns: u64,
}
