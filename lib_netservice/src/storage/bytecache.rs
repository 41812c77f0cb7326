//! # Byte Cache
//!
//! Get/set surface of a binary cache keyed by remote URL, used by calling
//! layers to avoid re-fetching payloads the backend already served.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use url::Url;

/// A binary cache keyed by the remote URL a payload was fetched from.
pub trait ByteCache {
    /// The cached payload for a key, if present.
    fn get(&self, key: &Url) -> Option<Vec<u8>>;

    /// Cache a payload under a key, replacing any previous value.
    fn set(&self, value: Vec<u8>, key: &Url);
}

/// Capacity-bounded in-memory cache; the oldest entry is evicted first.
pub struct MemoryByteCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

struct CacheState {
    entries: HashMap<Url, Vec<u8>>,
    order: VecDeque<Url>,
}

impl MemoryByteCache {
    /// A cache holding at most `capacity` entries. A zero capacity stores
    /// nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.state.lock().expect("MemoryByteCache lock poisoned").entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteCache for MemoryByteCache {
    fn get(&self, key: &Url) -> Option<Vec<u8>> {
        let state = self.state.lock().expect("MemoryByteCache lock poisoned");
        state.entries.get(key).cloned()
    }

    fn set(&self, value: Vec<u8>, key: &Url) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock().expect("MemoryByteCache lock poisoned");
        if state.entries.insert(key.clone(), value).is_none() {
            state.order.push_back(key.clone());
        }
        while state.entries.len() > self.capacity {
            let Some(evicted) = state.order.pop_front() else {
                break;
            };
            state.entries.remove(&evicted);
            log::debug!("Evicted cached payload for {evicted}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str) -> Url {
        Url::parse(&format!("https://cdn.example.com{path}")).unwrap()
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = MemoryByteCache::new(4);
        cache.set(vec![1, 2, 3], &key("/a.png"));
        assert_eq!(cache.get(&key("/a.png")), Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&key("/b.png")), None);
    }

    #[test]
    fn set_replaces_an_existing_entry() {
        let cache = MemoryByteCache::new(4);
        cache.set(vec![1], &key("/a.png"));
        cache.set(vec![2], &key("/a.png"));
        assert_eq!(cache.get(&key("/a.png")), Some(vec![2]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let cache = MemoryByteCache::new(2);
        cache.set(vec![1], &key("/a.png"));
        cache.set(vec![2], &key("/b.png"));
        cache.set(vec![3], &key("/c.png"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("/a.png")), None);
        assert_eq!(cache.get(&key("/b.png")), Some(vec![2]));
        assert_eq!(cache.get(&key("/c.png")), Some(vec![3]));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = MemoryByteCache::new(0);
        cache.set(vec![1], &key("/a.png"));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key("/a.png")), None);
    }
}
