//! Size Capability for Cached Values
//!
//! Every value stored in a [`ByteLruCache`](crate::ByteLruCache) reports how
//! many bytes it occupies through [`SizedValue`]. The cache charges each entry
//! `key.len() + value.len()` against its byte budget.
//!
//! The length is a `usize`, so a negative size cannot be expressed. Values
//! must report a stable length for as long as they are resident: the cache
//! records the charge at insertion time and subtracts the same figure when the
//! entry leaves.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A value that can report its size in bytes.
///
/// # Examples
///
/// ```
/// use bytecache::SizedValue;
///
/// #[derive(Clone)]
/// struct Thumbnail {
///     png: Vec<u8>,
/// }
///
/// impl SizedValue for Thumbnail {
///     fn len(&self) -> usize {
///         self.png.len()
///     }
/// }
///
/// let thumb = Thumbnail { png: vec![0u8; 128] };
/// assert_eq!(thumb.len(), 128);
/// ```
#[allow(clippy::len_without_is_empty)]
pub trait SizedValue {
    /// Number of bytes this value is charged for.
    fn len(&self) -> usize;
}

impl SizedValue for Vec<u8> {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl SizedValue for Box<[u8]> {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl SizedValue for Arc<[u8]> {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl SizedValue for String {
    fn len(&self) -> usize {
        str::len(self)
    }
}

impl SizedValue for &str {
    fn len(&self) -> usize {
        str::len(self)
    }
}

impl SizedValue for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}
