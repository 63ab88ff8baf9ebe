//! Concurrent Byte LRU Cache
//!
//! A thread-safe wrapper that shards keys across independently locked
//! [`ByteLruCache`] segments.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    ConcurrentByteLruCache                        │
//! │                                                                  │
//! │  hash(key) % N  ──▶  Segment Selection                           │
//! │                                                                  │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐          │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │          │
//! │  │    Mutex     │ │    Mutex     │     │    Mutex     │          │
//! │  │ ByteLruCache │ │ ByteLruCache │     │ ByteLruCache │          │
//! │  │ max_bytes/N  │ │ max_bytes/N  │     │ max_bytes/N  │          │
//! │  └──────────────┘ └──────────────┘     └──────────────┘          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trade-offs
//!
//! - Recency order and the byte budget are enforced **per segment**. An entry
//!   may be evicted from one segment while another holds older entries.
//! - Every segment stays within `max_bytes / N`, so the total stays within
//!   `max_bytes`. A bounded cache never has more segments than bytes.
//! - `max_bytes / N` is also the largest entry the cache holds. A bigger
//!   entry is evicted by the `add` that inserted it, even when it would fit
//!   in `max_bytes`. Use fewer segments for caches of large values.
//! - The eviction callback runs while the evicting segment is locked. It must
//!   not call back into the same cache.

extern crate alloc;

use crate::config::{ByteLruCacheConfig, ConcurrentByteLruCacheConfig, ConcurrentCacheConfig};
use crate::lru::{ByteLruCache, EvictionCallback};
use crate::metrics::{ByteLruCacheMetrics, CacheMetrics};
use crate::sized::SizedValue;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Eviction callback shared by every segment of a concurrent cache.
pub type SharedEvictionCallback<V> = Arc<dyn Fn(&str, &V) + Send + Sync>;

/// A thread-safe byte-budgeted LRU cache with segmented storage.
///
/// # Example
///
/// ```rust
/// use bytecache::concurrent::ConcurrentByteLruCache;
/// use bytecache::config::{ByteLruCacheConfig, ConcurrentCacheConfig};
/// use bytecache::ByteView;
///
/// let config = ConcurrentCacheConfig {
///     base: ByteLruCacheConfig { max_bytes: 64 * 1024 },
///     segments: 4,
/// };
/// let cache = ConcurrentByteLruCache::init(config, None);
///
/// cache.add("tom", ByteView::from("630"));
/// assert_eq!(cache.get("tom").map(|v| v.as_string()), Some("630".to_string()));
/// ```
pub struct ConcurrentByteLruCache<V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<ByteLruCache<V, S>>]>,
    hash_builder: S,
    max_bytes: u64,
    segment_max_bytes: u64,
    cursor: AtomicUsize,
}

impl<V> ConcurrentByteLruCache<V, DefaultHashBuilder>
where
    V: SizedValue + Send + 'static,
{
    /// Creates a cache with `max_bytes` spread over the default number of
    /// segments.
    ///
    /// Each segment gets `max_bytes / 16` (fewer segments for budgets under
    /// 16 bytes), which caps the charge of a single entry; see
    /// [`max_entry_bytes`](Self::max_entry_bytes).
    pub fn new(max_bytes: u64) -> Self {
        Self::init(
            ConcurrentCacheConfig {
                base: ByteLruCacheConfig { max_bytes },
                segments: super::default_segment_count(),
            },
            None,
        )
    }

    /// Creates a cache from a configuration.
    ///
    /// An entry charged more than the per-segment budget
    /// ([`ConcurrentByteLruCacheConfig::segment_max_bytes`]) cannot be held.
    pub fn init(
        config: ConcurrentByteLruCacheConfig,
        on_evicted: Option<SharedEvictionCallback<V>>,
    ) -> Self {
        Self::init_with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }
}

impl<V, S> ConcurrentByteLruCache<V, S>
where
    V: SizedValue + Send + 'static,
    S: BuildHasher + Clone + Send,
{
    /// Creates a cache from a configuration with a custom hash builder.
    ///
    /// The hash builder picks segments and is cloned into every segment's
    /// index.
    pub fn init_with_hasher(
        config: ConcurrentByteLruCacheConfig,
        on_evicted: Option<SharedEvictionCallback<V>>,
        hash_builder: S,
    ) -> Self {
        let segment_config = ByteLruCacheConfig {
            max_bytes: config.segment_max_bytes(),
        };

        let segments: Vec<_> = (0..config.segment_count())
            .map(|_| {
                let callback = on_evicted.clone().map(|shared| {
                    Box::new(move |key: &str, value: &V| shared(key, value)) as EvictionCallback<V>
                });
                Mutex::new(ByteLruCache::with_hasher(
                    segment_config,
                    callback,
                    hash_builder.clone(),
                ))
            })
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
            max_bytes: config.base.max_bytes,
            segment_max_bytes: segment_config.max_bytes,
            cursor: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn segment_index(&self, key: &str) -> usize {
        (self.hash_builder.hash_one(key) as usize) % self.segments.len()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Configured total budget; `0` means unbounded.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Largest charge a single entry may have; `0` means unbounded.
    ///
    /// This is the budget of one segment. Larger entries are evicted as soon
    /// as they are added.
    pub fn max_entry_bytes(&self) -> u64 {
        self.segment_max_bytes
    }

    /// Total number of resident entries.
    ///
    /// Segments are locked one after another, so under concurrent writes the
    /// result may be slightly stale.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if no segment holds an entry.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Total charge across all segments.
    pub fn current_bytes(&self) -> u64 {
        self.segments.iter().map(|s| s.lock().current_bytes()).sum()
    }

    /// Looks up `key` and returns a clone of its value, marking it most
    /// recently used within its segment.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Looks up `key` and applies `f` to the value while the segment is
    /// locked.
    pub fn get_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).map(f)
    }

    /// Returns `true` if `key` is resident. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        let idx = self.segment_index(key);
        self.segments[idx].lock().contains(key)
    }

    /// Inserts or replaces the value under `key`, evicting from the key's
    /// segment while that segment is over its share of the budget.
    pub fn add(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let idx = self.segment_index(&key);
        self.segments[idx].lock().add(key, value);
    }

    /// Evicts the least recently used entry of one non-empty segment.
    ///
    /// Successive calls start from successive segments so that repeated
    /// calls drain the cache evenly.
    pub fn remove_oldest(&self) -> Option<(String, V)> {
        let n = self.segments.len();
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        (0..n).find_map(|i| self.segments[(start + i) % n].lock().remove_oldest())
    }

    /// Counters summed over all segments.
    pub fn cache_metrics(&self) -> ByteLruCacheMetrics {
        let mut total = ByteLruCacheMetrics::new(0);
        for segment in self.segments.iter() {
            total.merge(segment.lock().cache_metrics());
        }
        total
    }
}

impl<V, S> CacheMetrics for ConcurrentByteLruCache<V, S>
where
    V: SizedValue + Send + 'static,
    S: BuildHasher + Clone + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.cache_metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<V, S> fmt::Debug for ConcurrentByteLruCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentByteLruCache")
            .field("segment_count", &self.segments.len())
            .field("max_bytes", &self.max_bytes)
            .field("max_entry_bytes", &self.segment_max_bytes)
            .finish()
    }
}
