//! Search Metrics Module
//!
//! Counts searches and their cumulative latency.

use std::time::Duration;

use serde::Serialize;

// == Search Metrics ==
/// Running totals for search requests, cache hits included.
#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    search_count: u64,
    total_search_time: Duration,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed search.
    pub fn record_search(&mut self, elapsed: Duration) {
        self.search_count += 1;
        self.total_search_time += elapsed;
    }

    pub fn search_count(&self) -> u64 {
        self.search_count
    }

    /// Mean search latency in milliseconds, 0.0 before the first search.
    pub fn average_search_time_ms(&self) -> f64 {
        if self.search_count == 0 {
            return 0.0;
        }
        self.total_search_time.as_secs_f64() * 1000.0 / self.search_count as f64
    }

    pub fn snapshot(&self) -> SearchMetricsSnapshot {
        SearchMetricsSnapshot {
            search_count: self.search_count,
            average_search_time_ms: self.average_search_time_ms(),
        }
    }
}

/// Serializable view of [`SearchMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMetricsSnapshot {
    pub search_count: u64,
    pub average_search_time_ms: f64,
}
