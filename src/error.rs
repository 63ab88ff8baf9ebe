//! Error types for the peer contract.
//!
//! The local cache itself has no failure modes: a miss is `None`, not an
//! error. Errors only arise when a value has to be fetched from another node.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Failure reported by a [`PeerGetter`](crate::peers::PeerGetter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeerError {
    /// The peer owns the key but has no value for it
    #[error("no value for key {key:?} in group {group:?}")]
    NotFound {
        /// Group the key was requested from
        group: String,
        /// Requested key
        key: String,
    },

    /// The peer does not serve the requested group
    #[error("unknown group: {0}")]
    UnknownGroup(String),

    /// The request could not be delivered or the reply could not be read
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result of a peer fetch.
pub type Result<T> = core::result::Result<T, PeerError>;
