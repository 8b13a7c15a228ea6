//! Cache Module
//!
//! Provides the bounded search-result cache with LRU eviction.

mod lru;
mod query_cache;
mod stats;


// Re-export public types
pub use lru::LruTracker;
pub use query_cache::QueryCache;
pub use stats::CacheStats;
