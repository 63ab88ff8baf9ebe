//! Byte LRU Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics for [`ByteLruCache`](crate::ByteLruCache).
///
/// Adds the resident entry count to the core counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteLruCacheMetrics {
    /// Core counters
    pub core: CoreCacheMetrics,
    /// Number of resident entries
    pub entries: u64,
}

impl ByteLruCacheMetrics {
    /// Creates empty metrics for a cache with the given budget.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
            entries: 0,
        }
    }

    /// Adds another cache's metrics into this one.
    pub fn merge(&mut self, other: &ByteLruCacheMetrics) {
        self.core.merge(&other.core);
        self.entries += other.entries;
    }

    /// Converts the metrics to a deterministic map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("entries".to_string(), self.entries as f64);
        metrics
    }
}

impl CacheMetrics for ByteLruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
