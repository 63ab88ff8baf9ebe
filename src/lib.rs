#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Byte Budget
//!
//! Every resident entry is charged `key.len() + value.len()` bytes. After
//! each [`ByteLruCache::add`] the cache evicts from the least recently used
//! end until the total charge is back within `max_bytes`. A budget of `0`
//! disables eviction entirely.
//!
//! ```text
//!   most recently used                         least recently used
//!          │                                            │
//!          ▼                                            ▼
//!     ┌─────────┐    ┌─────────┐    ┌─────────┐    ┌─────────┐
//!     │ k4 / v4 │◀──▶│ k2 / v2 │◀──▶│ k3 / v3 │◀──▶│ k1 / v1 │ ──▶ evicted first
//!     └─────────┘    └─────────┘    └─────────┘    └─────────┘
//!      get / add move an entry to the front
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ByteLruCache`] | Byte-budgeted LRU cache, single owner |
//! | [`ByteView`] | Immutable, cheaply clonable byte payload |
//! | [`SizedValue`] | Byte length of anything stored in the cache |
//! | [`peers::PeerPicker`] | Routes a key to the node that owns it |
//! | [`peers::PeerGetter`] | Fetches a value from a remote node |
//! | `ConcurrentByteLruCache` | Segmented, thread-safe wrapper (`concurrent` feature) |
//!
//! ## Example
//!
//! ```rust
//! use bytecache::{ByteLruCache, ByteView};
//!
//! // 8 bytes: room for two "kN" -> "v" entries (3 bytes each), not three
//! let mut cache = ByteLruCache::new(8, None);
//! cache.add("k1", ByteView::from("v"));
//! cache.add("k2", ByteView::from("v"));
//! cache.get("k1");                     // "k1" becomes most recently used
//! cache.add("k3", ByteView::from("v")); // "k2" is evicted
//!
//! assert!(cache.get("k2").is_none());
//! assert_eq!(cache.current_bytes(), 6);
//! ```
//!
//! ## Feature Flags
//!
//! - `hashbrown` (default): use `hashbrown` for the key index. Without it the
//!   crate links `std` and uses `std::collections::HashMap`.
//! - `nightly`: forward nightly optimizations to `hashbrown`.
//! - `std`: enable the standard library support of `tracing` and `thiserror`.
//! - `concurrent`: enable the `concurrent` module with `parking_lot` segment locks.

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Doubly linked list with stable node addresses.
///
/// **Note**: This module is internal infrastructure. It exposes raw pointer
/// operations whose invariants are maintained by [`ByteLruCache`].
pub(crate) mod list;

/// Byte length of cached values.
pub mod sized;

/// Immutable byte payload.
pub mod byteview;

/// Cache configuration structures.
pub mod config;

/// Byte-budgeted Least Recently Used cache.
pub mod lru;

/// Cache metrics system.
///
/// Counters kept by every cache and reported through the [`CacheMetrics`]
/// trait as a deterministic `BTreeMap`.
pub mod metrics;

/// Errors reported by peers.
pub mod error;

/// Contracts for routing keys to remote nodes.
pub mod peers;

/// Concurrent cache implementations.
///
/// Provides a thread-safe cache that partitions the key space across
/// segments, each protected by its own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use byteview::ByteView;
pub use error::PeerError;
pub use lru::{ByteLruCache, EvictionCallback};
pub use metrics::{ByteLruCacheMetrics, CacheMetrics};
pub use sized::SizedValue;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentByteLruCache;
