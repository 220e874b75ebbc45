//! Bounded cache of per-message attribute snapshots.
//!
//! Message ids handed out by the host are monotonically increasing numeric
//! strings, so dropping the numerically smallest keys approximates dropping
//! the oldest messages. When the cache grows past its capacity, a quarter of
//! the capacity is evicted in one sweep.

use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_CACHE_CAPACITY: usize = 20_000;

#[derive(Debug, Clone)]
pub struct BoundedRecentCache<V> {
    capacity: usize,
    entries: HashMap<String, V>,
}

impl<V> Default for BoundedRecentCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<V> BoundedRecentCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert or replace an entry, evicting the oldest quarter when over capacity.
    pub fn set(&mut self, id: impl Into<String>, value: V) {
        self.entries.insert(id.into(), value);
        if self.entries.len() > self.capacity {
            self.evict();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries dropped per eviction sweep.
    pub fn eviction_batch(&self) -> usize {
        (self.capacity / 4).max(1)
    }

    fn evict(&mut self) {
        let batch = self.eviction_batch();
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort_by(|a, b| compare_ids(a, b));
        let doomed: Vec<String> = keys.into_iter().take(batch).cloned().collect();

        for key in &doomed {
            self.entries.remove(key);
        }
        log::debug!(
            target: "Theme/Cache",
            "Evicted {} entries, {} remain (capacity {})",
            doomed.len(),
            self.entries.len(),
            self.capacity
        );
    }
}

/// Numeric ids first in numeric order, anything else after them lexicographically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
