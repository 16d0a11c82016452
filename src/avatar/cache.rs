//! Bounded avatar cache.

use std::collections::{HashMap, VecDeque};

/// Cache of per-entry avatar state, keyed by entry text.
///
/// Oldest insertions are evicted first once `capacity` is exceeded.
#[derive(Debug)]
pub struct AvatarCache<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
    capacity: usize,
}

impl<V> AvatarCache<V> {
    /// Create a cache holding at most `capacity` avatars.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Insert an avatar and return the keys evicted to make room.
    pub fn insert(&mut self, key: String, value: V) -> Vec<String> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return Vec::new();
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
