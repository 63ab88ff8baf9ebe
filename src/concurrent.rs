//! Concurrent Cache Implementations
//!
//! [`ByteLruCache`](crate::ByteLruCache) never locks; callers that share a
//! cache between threads must serialize access themselves. This module
//! provides that layer as a separate, opt-in type so the single-threaded
//! cache keeps its lock-free cost profile.
//!
//! # Architecture
//!
//! - The key space is partitioned across segments by key hash.
//! - Each segment is a `ByteLruCache` behind its own `parking_lot::Mutex`.
//! - An operation locks exactly one segment, so different keys proceed in
//!   parallel when they land in different segments.
//!
//! `get` must reorder the recency list, so every operation is a write and a
//! `Mutex` is used rather than an `RwLock`.
//!
//! # Example
//!
//! ```rust
//! use bytecache::concurrent::ConcurrentByteLruCache;
//! use bytecache::ByteView;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentByteLruCache::new(1 << 20));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.add(key.clone(), ByteView::from("payload"));
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

mod lru;

pub use self::lru::{ConcurrentByteLruCache, SharedEvictionCallback};

/// Default number of segments for caches built without an explicit count.
#[inline]
pub fn default_segment_count() -> usize {
    16
}
