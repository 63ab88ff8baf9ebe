//! Property-Based Tests for the Byte LRU Cache
//!
//! Replays random operation sequences against both the cache and a simple
//! vector model of the recency list, and checks that the two agree.

use bytecache::{ByteLruCache, ByteView, EvictionCallback};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

// == Strategies ==

/// Small key space so that updates and hits are frequent
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,3}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..24)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
    RemoveOldest,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => Just(CacheOp::RemoveOldest),
    ]
}

// == Model ==

/// Recency list, most recently used first.
#[derive(Default)]
struct Model {
    max_bytes: u64,
    entries: Vec<(String, Vec<u8>)>,
    evicted: Vec<String>,
}

impl Model {
    fn bytes(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1.clone();
        self.entries.insert(0, entry);
        Some(value)
    }

    fn add(&mut self, key: String, value: Vec<u8>) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, (key, value));
        while self.max_bytes != 0 && self.bytes() > self.max_bytes {
            self.remove_oldest();
        }
    }

    fn remove_oldest(&mut self) -> Option<String> {
        let (key, _) = self.entries.pop()?;
        self.evicted.push(key.clone());
        Some(key)
    }
}

fn recording_cache(max_bytes: u64) -> (ByteLruCache<ByteView>, Arc<Mutex<Vec<String>>>) {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let callback: EvictionCallback<ByteView> = Box::new(move |key, _value| {
        sink.lock().unwrap().push(key.to_string());
    });
    (ByteLruCache::new(max_bytes, Some(callback)), evicted)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The cache agrees with the model on every lookup, on the eviction order
    // and on the byte total, and stays within its budget after every add.
    #[test]
    fn prop_matches_recency_model(
        max_bytes in prop_oneof![Just(0u64), 1u64..64],
        ops in prop::collection::vec(cache_op_strategy(), 1..120),
    ) {
        let (mut cache, evicted) = recording_cache(max_bytes);
        let mut model = Model { max_bytes, ..Model::default() };

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    cache.add(key.clone(), ByteView::from(value.clone()));
                    model.add(key, value);
                    if max_bytes != 0 {
                        prop_assert!(cache.current_bytes() <= max_bytes);
                    }
                }
                CacheOp::Get { key } => {
                    let got = cache.get(&key).map(ByteView::byte_slice);
                    prop_assert_eq!(got, model.get(&key));
                }
                CacheOp::RemoveOldest => {
                    let got = cache.remove_oldest().map(|(k, _)| k);
                    prop_assert_eq!(got, model.remove_oldest());
                }
            }

            prop_assert_eq!(cache.current_bytes(), model.bytes());
            prop_assert_eq!(cache.len(), model.entries.len());
        }

        let order: Vec<&str> = cache.iter().map(|(k, _)| k).collect();
        let expected: Vec<&str> = model.entries.iter().map(|(k, _)| k.as_str()).collect();
        prop_assert_eq!(order, expected);
        prop_assert_eq!(&*evicted.lock().unwrap(), &model.evicted);
    }

    // With no budget nothing is ever evicted by `add`.
    #[test]
    fn prop_unbounded_keeps_every_key(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..100),
    ) {
        let (mut cache, evicted) = recording_cache(0);
        for (key, value) in &entries {
            cache.add(key.as_str(), ByteView::from(value.as_slice()));
        }
        for (key, _) in &entries {
            prop_assert!(cache.contains(key));
        }
        prop_assert!(evicted.lock().unwrap().is_empty());
    }

    // A miss leaves the recency order and the byte total untouched.
    #[test]
    fn prop_miss_changes_nothing(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..20),
    ) {
        let (mut cache, _evicted) = recording_cache(48);
        for (key, value) in entries {
            cache.add(key, ByteView::from(value));
        }
        let before: Vec<String> = cache.iter().map(|(k, _)| k.to_string()).collect();
        let bytes = cache.current_bytes();

        prop_assert!(cache.get("not-a-generated-key").is_none());

        let after: Vec<String> = cache.iter().map(|(k, _)| k.to_string()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(bytes, cache.current_bytes());
    }
}
