//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for query cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh sequence number:
/// - `stamps` maps key -> its latest sequence number
/// - `order` maps sequence number -> key, so the first entry is the
///   least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Latest access stamp per key
    stamps: HashMap<String, u64>,
    /// Keys ordered by access stamp, oldest first
    order: BTreeMap<u64, String>,
    /// Next stamp to hand out
    next_seq: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// An existing key has its old stamp retired before receiving a new one.
    pub fn touch(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;

        match self.stamps.get_mut(key) {
            Some(stamp) => {
                self.order.remove(stamp);
                *stamp = seq;
            }
            None => {
                self.stamps.insert(key.to_string(), seq);
            }
        }
        self.order.insert(seq, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.stamps.remove(key) {
            self.order.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    // == Clear ==
    /// Forgets every key. The sequence counter keeps running.
    pub fn clear(&mut self) {
        self.stamps.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    // == Is Empty ==
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }
}
