//! Basic metrics instrumentation for tracking search performance.
//!
//! Provides counters and duration tracking for searches and snapshot loads.

use crate::search::SearchPath;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for a search session.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of searches answered
    searches_total: Arc<AtomicU64>,

    /// Searches answered by the identifier fast path
    identifier_hits_total: Arc<AtomicU64>,

    /// Searches answered by fuzzy matching
    fuzzy_searches_total: Arc<AtomicU64>,

    /// Queries rejected as empty or too short
    rejected_queries_total: Arc<AtomicU64>,

    /// Total number of results returned
    results_returned_total: Arc<AtomicU64>,

    /// Total search time in microseconds
    search_duration_total_us: Arc<AtomicU64>,

    /// Snapshot loads that produced a searchable corpus
    snapshot_loads_total: Arc<AtomicU64>,

    /// Snapshot loads that failed or were empty
    snapshot_failures_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            searches_total: Arc::new(AtomicU64::new(0)),
            identifier_hits_total: Arc::new(AtomicU64::new(0)),
            fuzzy_searches_total: Arc::new(AtomicU64::new(0)),
            rejected_queries_total: Arc::new(AtomicU64::new(0)),
            results_returned_total: Arc::new(AtomicU64::new(0)),
            search_duration_total_us: Arc::new(AtomicU64::new(0)),
            snapshot_loads_total: Arc::new(AtomicU64::new(0)),
            snapshot_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a completed search.
    pub fn record_search(&self, path: SearchPath, duration: Duration, result_count: usize) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        self.search_duration_total_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.results_returned_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        let counter = match path {
            SearchPath::Identifier => &self.identifier_hits_total,
            SearchPath::Fuzzy => &self.fuzzy_searches_total,
            SearchPath::Rejected => &self.rejected_queries_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful snapshot load.
    pub fn record_snapshot_loaded(&self) {
        self.snapshot_loads_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed or empty snapshot load.
    pub fn record_snapshot_failure(&self) {
        self.snapshot_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total searches.
    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    /// Get identifier fast-path hits.
    pub fn identifier_hits_total(&self) -> u64 {
        self.identifier_hits_total.load(Ordering::Relaxed)
    }

    /// Get fuzzy searches.
    pub fn fuzzy_searches_total(&self) -> u64 {
        self.fuzzy_searches_total.load(Ordering::Relaxed)
    }

    /// Get rejected queries.
    pub fn rejected_queries_total(&self) -> u64 {
        self.rejected_queries_total.load(Ordering::Relaxed)
    }

    /// Get total results returned.
    pub fn results_returned_total(&self) -> u64 {
        self.results_returned_total.load(Ordering::Relaxed)
    }

    /// Get total search duration in microseconds.
    pub fn search_duration_total_us(&self) -> u64 {
        self.search_duration_total_us.load(Ordering::Relaxed)
    }

    /// Get average search duration in microseconds.
    pub fn search_duration_avg_us(&self) -> f64 {
        let total = self.search_duration_total_us.load(Ordering::Relaxed);
        let count = self.searches_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get successful snapshot loads.
    pub fn snapshot_loads_total(&self) -> u64 {
        self.snapshot_loads_total.load(Ordering::Relaxed)
    }

    /// Get failed snapshot loads.
    pub fn snapshot_failures_total(&self) -> u64 {
        self.snapshot_failures_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.searches_total.store(0, Ordering::Relaxed);
        self.identifier_hits_total.store(0, Ordering::Relaxed);
        self.fuzzy_searches_total.store(0, Ordering::Relaxed);
        self.rejected_queries_total.store(0, Ordering::Relaxed);
        self.results_returned_total.store(0, Ordering::Relaxed);
        self.search_duration_total_us.store(0, Ordering::Relaxed);
        self.snapshot_loads_total.store(0, Ordering::Relaxed);
        self.snapshot_failures_total.store(0, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            searches_total: self.searches_total(),
            identifier_hits_total: self.identifier_hits_total(),
            fuzzy_searches_total: self.fuzzy_searches_total(),
            rejected_queries_total: self.rejected_queries_total(),
            results_returned_total: self.results_returned_total(),
            search_duration_total_us: self.search_duration_total_us(),
            search_duration_avg_us: self.search_duration_avg_us(),
            snapshot_loads_total: self.snapshot_loads_total(),
            snapshot_failures_total: self.snapshot_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub searches_total: u64,
    pub identifier_hits_total: u64,
    pub fuzzy_searches_total: u64,
    pub rejected_queries_total: u64,
    pub results_returned_total: u64,
    pub search_duration_total_us: u64,
    pub search_duration_avg_us: f64,
    pub snapshot_loads_total: u64,
    pub snapshot_failures_total: u64,
}

/// Helper for timing a search.
pub struct SearchTimer {
    start: Instant,
    metrics: Metrics,
}

impl SearchTimer {
    /// Start timing a search.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the outcome.
    pub fn complete(self, path: SearchPath, result_count: usize) {
        let duration = self.start.elapsed();
        self.metrics.record_search(path, duration, result_count);
    }
}
