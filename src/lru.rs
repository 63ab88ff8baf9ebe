//! Byte-Budgeted Least Recently Used (LRU) Cache
//!
//! A recency-ordered map from string keys to [`SizedValue`]s. Every entry is
//! charged `key.len() + value.len()` bytes; when the running total exceeds the
//! configured budget the least recently used entries are evicted until it
//! fits again.
//!
//! # Algorithm
//!
//! Entries live in a doubly linked list ordered from most recently used
//! (front) to least recently used (back), indexed by a hash map from key to
//! list node:
//!
//! - `get` moves the hit entry to the front.
//! - `add` inserts at the front, or replaces the value of a resident key and
//!   moves it to the front, then evicts from the back while over budget.
//! - `remove_oldest` evicts the back entry.
//!
//! All three run in O(1), apart from the eviction loop which runs once per
//! evicted entry.
//!
//! # Budget
//!
//! A budget of `0` disables eviction: the cache grows without bound. A single
//! entry whose charge alone exceeds the budget is evicted by the same `add`
//! that inserted it, leaving the cache empty.
//!
//! # Eviction Callback
//!
//! An optional callback receives the key and value of every evicted entry.
//! It runs synchronously on the calling thread, inside `add` or
//! `remove_oldest`, after the entry has left the cache and its charge has
//! been subtracted. A slow callback therefore slows the `add` that triggered
//! it; hand expensive work off to another thread from inside the callback.
//! The callback cannot reach the cache it belongs to, since the cache is
//! mutably borrowed for the duration of the call.
//!
//! # Thread Safety
//!
//! `ByteLruCache` performs no locking of its own. It is `Send` (when its
//! values are), so an owning layer can put it behind a `Mutex` and serialize
//! every call, typically with one lock per cache shard. See
//! `ConcurrentByteLruCache` (feature `concurrent`) for such a layer.

extern crate alloc;

use crate::config::ByteLruCacheConfig;
use crate::list::{self, Entry, List};
use crate::metrics::{ByteLruCacheMetrics, CacheMetrics};
use crate::sized::SizedValue;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::BuildHasher;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Callback invoked with the key and value of each evicted entry.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

/// A byte-budgeted LRU cache.
///
/// Not safe for concurrent access: wrap it in a lock owned by the calling
/// layer.
///
/// # Examples
///
/// ```
/// use bytecache::{ByteLruCache, ByteView};
///
/// // Budget of 8 bytes; each entry below costs 2 (key) + 1 (value).
/// let mut cache = ByteLruCache::new(8, None);
/// cache.add("k1", ByteView::from("a"));
/// cache.add("k2", ByteView::from("b"));
///
/// // Touching k1 makes k2 the least recently used entry
/// assert!(cache.get("k1").is_some());
///
/// // 9 bytes > 8: k2 is evicted
/// cache.add("k3", ByteView::from("c"));
/// assert!(cache.get("k2").is_none());
/// assert_eq!(cache.current_bytes(), 6);
/// ```
pub struct ByteLruCache<V, S = DefaultHashBuilder> {
    config: ByteLruCacheConfig,
    current_bytes: u64,
    list: List<(String, V)>,
    map: HashMap<String, *mut Entry<(String, V)>, S>,
    on_evicted: Option<EvictionCallback<V>>,
    metrics: ByteLruCacheMetrics,
}

// SAFETY: the cache owns every node its raw pointers refer to; moving the
// cache to another thread moves all of them together.
unsafe impl<V: Send, S: Send> Send for ByteLruCache<V, S> {}

impl<V: SizedValue> ByteLruCache<V> {
    /// Creates a cache holding at most `max_bytes` of charge (`0` = unbounded).
    pub fn new(max_bytes: u64, on_evicted: Option<EvictionCallback<V>>) -> Self {
        Self::init(ByteLruCacheConfig { max_bytes }, on_evicted)
    }

    /// Creates a cache from a configuration.
    pub fn init(config: ByteLruCacheConfig, on_evicted: Option<EvictionCallback<V>>) -> Self {
        Self::with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }
}

impl<V: SizedValue, S: BuildHasher> ByteLruCache<V, S> {
    /// Creates a cache from a configuration using a custom hash builder for
    /// its key index.
    pub fn with_hasher(
        config: ByteLruCacheConfig,
        on_evicted: Option<EvictionCallback<V>>,
        hash_builder: S,
    ) -> Self {
        ByteLruCache {
            config,
            current_bytes: 0,
            list: List::new(),
            map: HashMap::with_hasher(hash_builder),
            on_evicted,
            metrics: ByteLruCacheMetrics::new(config.max_bytes),
        }
    }

    #[inline]
    fn charge(key: &str, value: &V) -> u64 {
        key.len() as u64 + value.len() as u64
    }

    /// Looks up `key`, marking it most recently used on a hit.
    ///
    /// A miss changes nothing but the request counters.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        // SAFETY: every pointer in the map refers to a live node of `list`
        unsafe {
            self.list.move_to_front(node);
            let (k, v) = (*node).get_value();
            self.metrics.core.record_hit(Self::charge(k, v));
            Some(v)
        }
    }

    /// Inserts or replaces the value under `key` and marks it most recently
    /// used, then evicts least recently used entries while over budget.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(node) = self.map.get(key.as_str()).copied() {
            // SAFETY: every pointer in the map refers to a live node of `list`
            unsafe {
                self.list.move_to_front(node);
                let (k, slot) = (*node).get_value_mut();
                let old = Self::charge(k, slot);
                *slot = value;
                let new = Self::charge(k, slot);
                self.current_bytes = self.current_bytes - old + new;
                self.metrics.core.record_update(old, new);
            }
        } else {
            let charge = Self::charge(&key, &value);
            if !self.config.is_unbounded() && charge > self.config.max_bytes {
                debug!(
                    key = key.as_str(),
                    charge,
                    max_bytes = self.config.max_bytes,
                    "entry exceeds the byte budget on its own"
                );
            }
            let node = self.list.push_front((key.clone(), value));
            self.map.insert(key, node);
            self.current_bytes += charge;
            self.metrics.core.record_insertion(charge);
            self.metrics.entries += 1;
        }

        self.evict_to_budget();
    }

    /// Evicts the least recently used entry, if any.
    ///
    /// The eviction callback sees the entry before it is handed back.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let node = self.list.pop_back()?;
        // SAFETY: popped nodes are real, detached nodes owned by us
        let (key, value) = unsafe { node.into_value() };
        self.map.remove(key.as_str());

        let charge = Self::charge(&key, &value);
        self.current_bytes -= charge;
        self.metrics.core.record_eviction(charge);
        self.metrics.entries -= 1;
        trace!(key = key.as_str(), charge, "evicted least recently used entry");

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&key, &value);
        }
        Some((key, value))
    }

    fn evict_to_budget(&mut self) {
        if self.config.is_unbounded() {
            return;
        }
        while self.current_bytes > self.config.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }

    /// Returns the value under `key` without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let node = *self.map.get(key)?;
        // SAFETY: every pointer in the map refers to a live node of `list`
        unsafe { Some(&(*node).get_value().1) }
    }

    /// Returns `true` if `key` is resident. Does not touch recency.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}

impl<V, S> ByteLruCache<V, S> {
    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Total charge of resident entries.
    #[inline]
    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }

    /// Configured budget; `0` means unbounded.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    /// Current counters.
    #[inline]
    pub fn cache_metrics(&self) -> &ByteLruCacheMetrics {
        &self.metrics
    }

    /// Iterates over resident entries from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<V, S> CacheMetrics for ByteLruCache<V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<V, S> fmt::Debug for ByteLruCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteLruCache")
            .field("max_bytes", &self.config.max_bytes)
            .field("current_bytes", &self.current_bytes)
            .field("len", &self.list.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

/// Iterator over `(key, value)` pairs from most to least recently used.
pub struct Iter<'a, V> {
    inner: list::Iter<'a, (String, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("inner", &self.inner).finish()
    }
}
