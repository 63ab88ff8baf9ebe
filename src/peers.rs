//! Peer Contracts
//!
//! A distributed cache built on this crate routes each key to the node that
//! owns it. These traits describe that routing layer so the local cache can
//! sit underneath it unchanged. Nothing here is implemented by this crate:
//! hashing keys onto nodes, transports and wire encodings all belong to the
//! layer that implements these traits.
//!
//! Peer fetches use one structured request/response shape. How a request is
//! encoded on the wire is up to the transport.
//!
//! # Examples
//!
//! ```
//! use bytecache::peers::{GetRequest, GetResponse, PeerGetter, PeerPicker};
//! use bytecache::{ByteView, PeerError};
//!
//! struct Loopback;
//!
//! impl PeerGetter for Loopback {
//!     fn get(&self, request: &GetRequest) -> Result<GetResponse, PeerError> {
//!         Ok(GetResponse {
//!             value: ByteView::from(request.key.as_str()),
//!         })
//!     }
//! }
//!
//! struct Single(Loopback);
//!
//! impl PeerPicker for Single {
//!     type Peer = Loopback;
//!
//!     fn pick_peer(&self, _key: &str) -> Option<&Loopback> {
//!         Some(&self.0)
//!     }
//! }
//!
//! let picker = Single(Loopback);
//! let peer = picker.pick_peer("tom").unwrap();
//! let response = peer.get(&GetRequest::new("scores", "tom")).unwrap();
//! assert_eq!(response.value.as_string(), "tom");
//! ```

extern crate alloc;

use crate::byteview::ByteView;
use crate::error::Result;
use alloc::string::String;

/// Request for one key of one cache group on a remote node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GetRequest {
    /// Name of the cache group
    pub group: String,
    /// Key within the group
    pub key: String,
}

impl GetRequest {
    /// Builds a request for `key` in `group`.
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }
}

/// Reply carrying the value a remote node holds for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    /// The cached payload
    pub value: ByteView,
}

/// Fetches values from one remote node.
pub trait PeerGetter {
    /// Asks the node for the value of `request.key` in `request.group`.
    fn get(&self, request: &GetRequest) -> Result<GetResponse>;
}

/// Chooses the node that owns a key.
pub trait PeerPicker {
    /// Handle used to reach the chosen node
    type Peer: PeerGetter;

    /// Returns the remote owner of `key`, or `None` when the key belongs to
    /// the local node (or no peers are known) and should be loaded locally.
    fn pick_peer(&self, key: &str) -> Option<&Self::Peer>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeerError;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    struct FixedPeer {
        group: &'static str,
        entries: Vec<(&'static str, &'static str)>,
    }

    impl PeerGetter for FixedPeer {
        fn get(&self, request: &GetRequest) -> Result<GetResponse> {
            if request.group != self.group {
                return Err(PeerError::UnknownGroup(request.group.clone()));
            }
            self.entries
                .iter()
                .find(|(k, _)| *k == request.key)
                .map(|(_, v)| GetResponse {
                    value: ByteView::from(*v),
                })
                .ok_or_else(|| PeerError::NotFound {
                    group: request.group.clone(),
                    key: request.key.clone(),
                })
        }
    }

    struct ByFirstByte {
        peers: Vec<FixedPeer>,
    }

    impl PeerPicker for ByFirstByte {
        type Peer = FixedPeer;

        fn pick_peer(&self, key: &str) -> Option<&FixedPeer> {
            let first = *key.as_bytes().first()?;
            self.peers.get(first as usize % self.peers.len())
        }
    }

    #[test]
    fn test_request_construction() {
        let request = GetRequest::new("scores", String::from("tom"));
        assert_eq!(request.group, "scores");
        assert_eq!(request.key, "tom");
    }

    #[test]
    fn test_picker_routes_to_getter() {
        let picker = ByFirstByte {
            peers: alloc::vec![FixedPeer {
                group: "scores",
                entries: alloc::vec![("tom", "630")],
            }],
        };

        assert!(picker.pick_peer("").is_none());

        let peer = picker.pick_peer("tom").unwrap();
        let response = peer.get(&GetRequest::new("scores", "tom")).unwrap();
        assert_eq!(response.value.as_string(), "630");

        assert_eq!(
            peer.get(&GetRequest::new("scores", "jack")),
            Err(PeerError::NotFound {
                group: "scores".to_string(),
                key: "jack".to_string(),
            })
        );
        assert_eq!(
            peer.get(&GetRequest::new("ranks", "tom")),
            Err(PeerError::UnknownGroup("ranks".to_string()))
        );
    }
}
