//! A minimal cache group on top of the local cache and the peer contracts.
//!
//! Two in-process "nodes" split the key space by first byte. Each node
//! answers from its local cache, asks the owning peer for keys it does not
//! own, and falls back to a slow loader for keys it owns.
//!
//! Run with `cargo run --example group_usage --features concurrent`.

use bytecache::peers::{GetRequest, GetResponse, PeerGetter, PeerPicker};
use bytecache::{ByteView, CacheMetrics, ConcurrentByteLruCache, PeerError};
use std::collections::HashMap;
use std::sync::Arc;

type Loader = Box<dyn Fn(&str) -> Option<ByteView> + Send + Sync>;

/// One node's view of a named cache group.
struct Group {
    name: String,
    cache: ConcurrentByteLruCache<ByteView>,
    loader: Loader,
}

impl Group {
    fn new(name: &str, max_bytes: u64, loader: Loader) -> Self {
        Self {
            name: name.to_string(),
            cache: ConcurrentByteLruCache::new(max_bytes),
            loader,
        }
    }

    /// Looks up `key` locally, then through `picker`, then with the loader.
    fn get<P: PeerPicker>(&self, key: &str, picker: &P) -> Result<ByteView, PeerError> {
        if let Some(view) = self.cache.get(key) {
            println!("[{}] hit {key}", self.name);
            return Ok(view);
        }

        if let Some(peer) = picker.pick_peer(key) {
            let response = peer.get(&GetRequest::new(self.name.as_str(), key))?;
            println!("[{}] fetched {key} from peer", self.name);
            // values owned by a peer are not cached locally
            return Ok(response.value);
        }

        self.load_local(key)
    }

    fn load_local(&self, key: &str) -> Result<ByteView, PeerError> {
        let view = (self.loader)(key).ok_or_else(|| PeerError::NotFound {
            group: self.name.clone(),
            key: key.to_string(),
        })?;
        println!("[{}] loaded {key} from source", self.name);
        self.cache.add(key, view.clone());
        Ok(view)
    }
}

/// A node reached through its `Group`, standing in for a network client.
struct Node {
    groups: HashMap<String, Arc<Group>>,
}

impl PeerGetter for Node {
    fn get(&self, request: &GetRequest) -> Result<GetResponse, PeerError> {
        let group = self
            .groups
            .get(&request.group)
            .ok_or_else(|| PeerError::UnknownGroup(request.group.clone()))?;
        let value = match group.cache.get(&request.key) {
            Some(view) => view,
            None => group.load_local(&request.key)?,
        };
        Ok(GetResponse { value })
    }
}

/// Keys starting with `a..=m` belong to node 0, the rest to node 1.
struct FirstLetterPicker<'a> {
    local: usize,
    nodes: [&'a Node; 2],
}

impl PeerPicker for FirstLetterPicker<'_> {
    type Peer = Node;

    fn pick_peer(&self, key: &str) -> Option<&Node> {
        let owner = match key.bytes().next() {
            Some(b'a'..=b'm') => 0,
            _ => 1,
        };
        (owner != self.local).then(|| self.nodes[owner])
    }
}

fn scores_loader() -> Loader {
    let db: HashMap<&'static str, &'static str> =
        [("tom", "630"), ("jack", "589"), ("sam", "567")].into_iter().collect();
    Box::new(move |key: &str| db.get(key).map(|v| ByteView::from(*v)))
}

fn make_node() -> Node {
    let group = Arc::new(Group::new("scores", 2 << 10, scores_loader()));
    Node {
        groups: HashMap::from([("scores".to_string(), group)]),
    }
}

fn main() {
    let nodes = [make_node(), make_node()];
    let picker = FirstLetterPicker {
        local: 0,
        nodes: [&nodes[0], &nodes[1]],
    };
    let local = &nodes[0].groups["scores"];

    for key in ["jack", "tom", "jack", "tom", "kate"] {
        match local.get(key, &picker) {
            Ok(view) => println!("{key} = {}", view.as_string()),
            Err(err) => println!("{key}: {err}"),
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        let metrics = node.groups["scores"].cache.metrics();
        println!(
            "node {i}: {} entries, {} bytes, hit rate {:.2}",
            metrics["entries"], metrics["cache_size_bytes"], metrics["hit_rate"]
        );
    }
}
