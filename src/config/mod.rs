//! Cache Configuration Module
//!
//! Configuration structs have public fields and are passed to the cache's
//! `init` constructor:
//!
//! | Config | Cache |
//! |--------|-------|
//! | `ByteLruCacheConfig` | [`ByteLruCache`](crate::ByteLruCache) |
//! | `ConcurrentByteLruCacheConfig` | `ConcurrentByteLruCache` (requires `concurrent` feature) |
//!
//! # Examples
//!
//! ```
//! use bytecache::config::ByteLruCacheConfig;
//! use bytecache::{ByteLruCache, ByteView};
//!
//! let config = ByteLruCacheConfig { max_bytes: 1024 };
//! let cache: ByteLruCache<ByteView> = ByteLruCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

pub mod lru;

pub use lru::ByteLruCacheConfig;

/// Generic configuration wrapper for concurrent caches.
///
/// Wraps a base cache configuration and adds the `segments` field
/// controlling how many independently locked segments share the key space.
///
/// # Sizing Note
///
/// `max_bytes` in the base config applies to the **entire cache**. Each
/// segment receives `max_bytes / segments`; an unbounded base stays unbounded
/// in every segment. A bounded cache never gets more segments than it has
/// bytes, so the segment budgets never add up to more than `max_bytes`.
///
/// The segment budget is also the largest entry the cache can hold: an entry
/// charged more than `max_bytes / segments` is evicted by the `add` that
/// inserted it, even if it would fit in the total budget.
///
/// # Example
///
/// ```ignore
/// use bytecache::config::{ByteLruCacheConfig, ConcurrentByteLruCacheConfig, ConcurrentCacheConfig};
///
/// // 256MB spread across 16 segments
/// let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
///     base: ByteLruCacheConfig { max_bytes: 256 * 1024 * 1024 },
///     segments: 16,
/// };
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy)]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration for the underlying cache
    pub base: C,
    /// Number of segments for sharding (more segments = less contention).
    /// `0` is treated as `1`.
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: core::fmt::Debug> core::fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent byte-budgeted LRU cache.
/// Type alias for `ConcurrentCacheConfig<ByteLruCacheConfig>`.
pub type ConcurrentByteLruCacheConfig = ConcurrentCacheConfig<ByteLruCacheConfig>;

#[cfg(feature = "concurrent")]
impl ConcurrentByteLruCacheConfig {
    /// Number of segments actually created.
    ///
    /// At least one, and no more than `max_bytes` when bounded.
    pub fn segment_count(&self) -> usize {
        let requested = self.segments.max(1);
        if self.base.is_unbounded() {
            return requested;
        }
        let cap = usize::try_from(self.base.max_bytes).unwrap_or(usize::MAX);
        requested.min(cap)
    }

    /// Byte budget handed to each segment, and therefore the largest charge
    /// a single entry may have. `0` when the total budget is unbounded.
    pub fn segment_max_bytes(&self) -> u64 {
        if self.base.is_unbounded() {
            return 0;
        }
        self.base.max_bytes / self.segment_count() as u64
    }
}

#[cfg(all(test, feature = "concurrent"))]
mod tests {
    use super::*;

    #[test]
    fn test_segment_budget_split() {
        let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
            base: ByteLruCacheConfig { max_bytes: 1600 },
            segments: 16,
        };
        assert_eq!(config.segment_count(), 16);
        assert_eq!(config.segment_max_bytes(), 100);
    }

    #[test]
    fn test_unbounded_stays_unbounded() {
        let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
            base: ByteLruCacheConfig { max_bytes: 0 },
            segments: 8,
        };
        assert_eq!(config.segment_max_bytes(), 0);
    }

    #[test]
    fn test_zero_segments_means_one() {
        let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
            base: ByteLruCacheConfig { max_bytes: 3 },
            segments: 0,
        };
        assert_eq!(config.segment_count(), 1);
        assert_eq!(config.segment_max_bytes(), 3);
    }

    #[test]
    fn test_tiny_budget_caps_segment_count() {
        let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
            base: ByteLruCacheConfig { max_bytes: 3 },
            segments: 8,
        };
        assert_eq!(config.segment_count(), 3);
        assert_eq!(config.segment_max_bytes(), 1);
        assert!(config.segment_max_bytes() * config.segment_count() as u64 <= 3);
    }

    #[test]
    fn test_unbounded_keeps_requested_segments() {
        let config: ConcurrentByteLruCacheConfig = ConcurrentCacheConfig {
            base: ByteLruCacheConfig { max_bytes: 0 },
            segments: 64,
        };
        assert_eq!(config.segment_count(), 64);
    }
}
