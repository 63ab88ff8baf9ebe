//! Cache Metrics System
//!
//! Counters are kept as plain integers on the cache itself and reported as a
//! `BTreeMap<String, f64>` through the [`CacheMetrics`] trait. BTreeMap keeps
//! the key order deterministic, which makes reports comparable across runs.
//!
//! All byte figures are *charges* (`key.len() + value.len()`), the same unit
//! the cache budget is expressed in.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::ByteLruCacheMetrics;

/// Counters common to every cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups
    pub requests: u64,

    /// Lookups that found a resident entry
    pub cache_hits: u64,

    /// Entries inserted under a key that was not resident
    pub insertions: u64,

    /// Values replaced under a resident key
    pub updates: u64,

    /// Entries removed to satisfy the byte budget or by `remove_oldest`
    pub evictions: u64,

    /// Total charge of entries returned by hits
    pub bytes_served_from_cache: u64,

    /// Total charge written by inserts and updates
    pub bytes_written_to_cache: u64,

    /// Total charge released by evictions
    pub bytes_evicted: u64,

    /// Current total charge of resident entries
    pub cache_size_bytes: u64,

    /// Configured budget, `0` when unbounded
    pub max_cache_size_bytes: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters for a cache with the given budget.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            max_cache_size_bytes,
            ..Default::default()
        }
    }

    /// Records a lookup that found an entry with the given charge.
    pub fn record_hit(&mut self, charge: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.bytes_served_from_cache += charge;
    }

    /// Records a lookup that found nothing.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry with the given charge.
    pub fn record_insertion(&mut self, charge: u64) {
        self.insertions += 1;
        self.cache_size_bytes += charge;
        self.bytes_written_to_cache += charge;
    }

    /// Records a value replacement under a resident key.
    pub fn record_update(&mut self, old_charge: u64, new_charge: u64) {
        self.updates += 1;
        self.cache_size_bytes = self.cache_size_bytes - old_charge + new_charge;
        self.bytes_written_to_cache += new_charge;
    }

    /// Records the eviction of an entry with the given charge.
    pub fn record_eviction(&mut self, charge: u64) {
        self.evictions += 1;
        self.bytes_evicted += charge;
        self.cache_size_bytes -= charge;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Hit ratio between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss ratio between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of the budget in use, or 0.0 for an unbounded cache.
    pub fn cache_utilization(&self) -> f64 {
        if self.max_cache_size_bytes > 0 {
            self.cache_size_bytes as f64 / self.max_cache_size_bytes as f64
        } else {
            0.0
        }
    }

    /// Adds another set of counters into this one.
    ///
    /// Used to aggregate per-segment counters of a sharded cache.
    pub fn merge(&mut self, other: &CoreCacheMetrics) {
        self.requests += other.requests;
        self.cache_hits += other.cache_hits;
        self.insertions += other.insertions;
        self.updates += other.updates;
        self.evictions += other.evictions;
        self.bytes_served_from_cache += other.bytes_served_from_cache;
        self.bytes_written_to_cache += other.bytes_written_to_cache;
        self.bytes_evicted += other.bytes_evicted;
        self.cache_size_bytes += other.cache_size_bytes;
        self.max_cache_size_bytes += other.max_cache_size_bytes;
    }

    /// Converts the counters to a deterministic map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert(
            "bytes_served_from_cache".to_string(),
            self.bytes_served_from_cache as f64,
        );
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );
        metrics.insert("bytes_evicted".to_string(), self.bytes_evicted as f64);

        metrics.insert("cache_size_bytes".to_string(), self.cache_size_bytes as f64);
        metrics.insert(
            "max_cache_size_bytes".to_string(),
            self.max_cache_size_bytes as f64,
        );
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        metrics
    }
}

/// Uniform metrics reporting for caches.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the eviction policy, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
