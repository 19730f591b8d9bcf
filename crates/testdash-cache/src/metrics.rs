//! Cache metrics.
//!
//! Counters are emitted through the `metrics` facade so any installed
//! recorder can export them. [`CacheStats`] keeps the same numbers in
//! process for health output and tests.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metric names for the cache layer.
pub mod names {
    /// Reads served from the cache.
    pub const CACHE_HITS_TOTAL: &str = "testdash_cache_hits_total";
    /// Reads that fell through to the caller.
    pub const CACHE_MISSES_TOTAL: &str = "testdash_cache_misses_total";
    /// Store failures swallowed by the manager.
    pub const CACHE_ERRORS_TOTAL: &str = "testdash_cache_errors_total";
    /// Keys removed by invalidation.
    pub const CACHE_INVALIDATED_KEYS_TOTAL: &str = "testdash_cache_invalidated_keys_total";
    /// Store operation duration in seconds.
    pub const CACHE_OPERATION_DURATION: &str = "testdash_cache_operation_duration_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of cache store failures absorbed by the manager"
    );
    describe_counter!(
        names::CACHE_INVALIDATED_KEYS_TOTAL,
        "Total number of keys removed by invalidation"
    );
    describe_histogram!(
        names::CACHE_OPERATION_DURATION,
        "Cache store operation duration in seconds"
    );
}

/// In-process cache counters.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
    invalidated: AtomicU64,
}

impl CacheStats {
    /// Record a hit.
    pub fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!(names::CACHE_HITS_TOTAL).increment(1);
    }

    /// Record a miss.
    pub fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!(names::CACHE_MISSES_TOTAL).increment(1);
    }

    /// Record a swallowed store failure.
    pub fn error(&self, operation: &'static str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record keys removed by an invalidation.
    pub fn invalidated(&self, keys: u64) {
        self.invalidated.fetch_add(keys, Ordering::Relaxed);
        counter!(names::CACHE_INVALIDATED_KEYS_TOTAL).increment(keys);
    }

    /// Record how long a store call took.
    pub fn observe(&self, operation: &'static str, elapsed: Duration) {
        histogram!(names::CACHE_OPERATION_DURATION, "operation" => operation)
            .record(elapsed.as_secs_f64());
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            invalidated_keys: self.invalidated.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
    pub invalidated_keys: u64,
}

impl CacheStatsSnapshot {
    /// Fraction of reads served from the cache, or 0 with no reads.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}
