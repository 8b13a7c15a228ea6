//! Query Cache Module
//!
//! Bounded search-result cache with LRU eviction and wholesale invalidation.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheStats, LruTracker};
use crate::catalog::Product;
use crate::error::{CatalogError, Result};

// == Query Cache ==
/// Maps canonical search keys to snapshots of their result lists.
///
/// Not synchronized itself; the owner serializes access behind one lock.
#[derive(Debug)]
pub struct QueryCache {
    /// Cached result snapshots
    entries: HashMap<String, Vec<Product>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Bumped by every invalidation
    generation: u64,
}

impl QueryCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with a configuration error when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CatalogError::Configuration(
                "Query cache capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            generation: 0,
        })
    }

    // == Get ==
    /// Returns a copy of the cached results and marks the key most recently used.
    pub fn get(&mut self, key: &str) -> Option<Vec<Product>> {
        match self.entries.get(key) {
            Some(products) => {
                let copy = products.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                debug!("Query cache hit: {}", key);
                Some(copy)
            }
            None => {
                self.stats.record_miss();
                debug!("Query cache miss: {}", key);
                None
            }
        }
    }

    // == Put ==
    /// Stores a copy of `value` under `key` as the most recently used entry.
    ///
    /// When the insert pushes the cache past capacity, the single least
    /// recently used entry is evicted. An empty key is rejected.
    pub fn put(&mut self, key: &str, value: &[Product]) -> Result<()> {
        if key.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "Cache key cannot be empty".to_string(),
            ));
        }

        self.entries.insert(key.to_string(), value.to_vec());
        self.lru.touch(key);

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Query cache evicted: {}", evicted);
            }
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    /// Like [`put`](Self::put), but only if no invalidation happened since
    /// `generation` was read.
    ///
    /// Returns whether the entry was stored.
    pub fn put_if_generation(
        &mut self,
        generation: u64,
        key: &str,
        value: &[Product],
    ) -> Result<bool> {
        if generation != self.generation {
            debug!("Query cache dropped stale result: {}", key);
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }

    // == Invalidate All ==
    /// Drops every entry and starts a new generation.
    pub fn invalidate_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.generation += 1;
        self.stats.record_invalidation();
        self.stats.set_total_entries(0);
        debug!("Query cache invalidated ({} entries dropped)", dropped);
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Size ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
