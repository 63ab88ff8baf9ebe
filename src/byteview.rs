//! Immutable Byte Views
//!
//! [`ByteView`] is the value type the cache hands back to callers. It owns a
//! shared, immutable byte buffer and never gives out a reference into it:
//! reading the bytes always produces a fresh copy, so nothing a caller does
//! with the result can change what the cache holds.
//!
//! Cloning a view is cheap (a reference count bump), which lets a caching
//! layer return the same payload to many callers without copying it on every
//! hit.
//!
//! # Examples
//!
//! ```
//! use bytecache::ByteView;
//!
//! let view = ByteView::from("cached payload");
//! let mut copy = view.byte_slice();
//! copy[0] = b'C';
//!
//! assert_eq!(view.as_string(), "cached payload");
//! assert_eq!(view.len(), 14);
//! ```

extern crate alloc;

use crate::sized::SizedValue;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// An immutable view over a byte payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Arc<[u8]>,
}

impl ByteView {
    /// Creates a view holding a copy of `bytes`.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self { b: Arc::from(bytes) }
    }

    /// Returns the payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Returns `true` if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Returns a freshly allocated copy of the payload.
    ///
    /// The returned buffer is independent of the view: mutating it has no
    /// effect on this view or on any clone of it.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Returns the payload as a string.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.b).into_owned()
    }
}

impl SizedValue for ByteView {
    #[inline]
    fn len(&self) -> usize {
        self.b.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self { b: bytes.into() }
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from_slice(s.as_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.b.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn test_byteview_len() {
        let view = ByteView::from(vec![1u8, 2, 3]);
        assert_eq!(view.len(), 3);
        assert_eq!(SizedValue::len(&view), 3);
        assert!(!view.is_empty());
        assert!(ByteView::from("").is_empty());
    }

    #[test]
    fn test_byte_slice_is_independent_copy() {
        let view = ByteView::from("abc");
        let mut first = view.byte_slice();
        first[0] = b'z';
        first.push(b'!');

        assert_eq!(view.byte_slice(), b"abc");
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_clone_shares_payload_but_copies_stay_private() {
        let view = ByteView::from(String::from("shared"));
        let other = view.clone();
        let mut copy = other.byte_slice();
        copy.clear();

        assert_eq!(view, other);
        assert_eq!(view.as_string(), "shared");
    }

    #[test]
    fn test_construction_copies_source() {
        let mut source = vec![b'a', b'b'];
        let view = ByteView::from(&source[..]);
        source[0] = b'x';
        assert_eq!(view.as_string(), "ab");
    }

    #[test]
    fn test_as_string_replaces_invalid_utf8() {
        let view = ByteView::from(vec![b'o', b'k', 0xff]);
        assert_eq!(view.as_string(), "ok\u{fffd}");
        assert_eq!(format!("{}", view), "ok\u{fffd}");
    }

    #[test]
    fn test_debug_hides_payload() {
        let view = ByteView::from("secret");
        assert_eq!(format!("{:?}", view), "ByteView { len: 6 }");
    }
}
