//! Configuration for the byte-budgeted LRU cache.
//!
//! # Sizing Guidelines
//!
//! `max_bytes` bounds the total *charge* of resident entries, where each entry
//! is charged `key.len() + value.len()`. It does not cover allocator overhead,
//! list nodes, or the hash index, so budget roughly 100 extra bytes per entry
//! on top of it when sizing a process:
//!
//! ```text
//! Total Memory ≈ max_bytes + (entries × ~100 bytes)
//! ```
//!
//! Setting `max_bytes` to `0` disables eviction entirely. Only do that when
//! an outer layer bounds the number of distinct keys.
//!
//! # Examples
//!
//! ```
//! use bytecache::config::ByteLruCacheConfig;
//! use bytecache::{ByteLruCache, ByteView};
//!
//! // 64MB of keys and payloads
//! let config = ByteLruCacheConfig {
//!     max_bytes: 64 * 1024 * 1024,
//! };
//! let cache: ByteLruCache<ByteView> = ByteLruCache::init(config, None);
//! assert_eq!(cache.max_bytes(), 64 * 1024 * 1024);
//! ```

use core::fmt;

/// Configuration for a [`ByteLruCache`](crate::ByteLruCache).
///
/// # Fields
///
/// - `max_bytes`: Maximum total charge, in bytes, before least recently used
///   entries are evicted. `0` means unbounded.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteLruCacheConfig {
    /// Maximum total charge (`key.len() + value.len()` summed over entries).
    /// `0` disables eviction.
    pub max_bytes: u64,
}

impl ByteLruCacheConfig {
    /// Returns `true` if this configuration never evicts.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_bytes == 0
    }
}

impl fmt::Debug for ByteLruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteLruCacheConfig")
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}
