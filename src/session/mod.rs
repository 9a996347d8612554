//! Search session: the engine currently in use plus its load state.
//!
//! The active corpus sits behind `RwLock<Arc<..>>`. A reload builds the new
//! engine first and then swaps the `Arc`, so a search that already holds the
//! old one finishes against it and never sees a partially built index.

use crate::client::SnapshotLoader;
use crate::corpus::{CorpusStats, CorpusStore};
use crate::error::CorpusError;
use crate::matching::MatchOptions;
use crate::metrics::{Metrics, SearchTimer};
use crate::models::{Snapshot, SnapshotMetadata, VoterRecord};
use crate::search::{MatchEngine, MatchResult, SearchOutcome, SearchWeights};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Outcome of the most recent load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    NotLoaded,
    Ready { records: usize },
    Empty,
    Failed { reason: String },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Everything one load produced, swapped as a unit.
#[derive(Debug)]
pub struct ActiveCorpus {
    pub engine: MatchEngine,
    pub state: LoadState,
    pub metadata: SnapshotMetadata,
    pub stats: CorpusStats,
}

impl ActiveCorpus {
    fn inert(state: LoadState) -> Self {
        Self {
            engine: MatchEngine::empty(),
            state,
            metadata: SnapshotMetadata::default(),
            stats: CorpusStats::default(),
        }
    }
}

/// A search session over one snapshot at a time.
pub struct SearchSession {
    options: MatchOptions,
    weights: SearchWeights,
    active: RwLock<Arc<ActiveCorpus>>,
    metrics: Metrics,
}

impl SearchSession {
    /// Create a session with default field weights. Nothing is searchable
    /// until a snapshot is loaded.
    pub fn new(options: MatchOptions) -> Self {
        Self::with_weights(options, SearchWeights::default())
    }

    pub fn with_weights(options: MatchOptions, weights: SearchWeights) -> Self {
        Self {
            options,
            weights,
            active: RwLock::new(Arc::new(ActiveCorpus::inert(LoadState::NotLoaded))),
            metrics: Metrics::new(),
        }
    }

    /// Fetch a snapshot and make it the active corpus.
    ///
    /// Failures never propagate: they are logged and recorded as state, and
    /// the session is left searchable but empty.
    pub async fn load(&self, loader: &dyn SnapshotLoader) -> LoadState {
        match loader.load_snapshot().await {
            Ok(snapshot) => self.install_snapshot(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot load failed, showing empty state");
                self.metrics.record_snapshot_failure();
                let state = LoadState::Failed {
                    reason: e.to_string(),
                };
                self.swap(ActiveCorpus::inert(state.clone()));
                state
            }
        }
    }

    /// Make `records` the active corpus, with no snapshot metadata.
    pub fn install(&self, records: Vec<VoterRecord>) -> LoadState {
        self.install_snapshot(Snapshot {
            voters: records,
            metadata: SnapshotMetadata::default(),
        })
    }

    /// Index a parsed snapshot and swap it in.
    pub fn install_snapshot(&self, snapshot: Snapshot) -> LoadState {
        let Snapshot { voters, metadata } = snapshot;

        let corpus = match CorpusStore::from_records(voters) {
            Ok(corpus) => corpus,
            Err(CorpusError::Empty) => {
                tracing::warn!("Snapshot has no voters, showing empty state");
                self.metrics.record_snapshot_failure();
                let mut active = ActiveCorpus::inert(LoadState::Empty);
                active.metadata = metadata;
                self.swap(active);
                return LoadState::Empty;
            }
        };

        let stats = CorpusStats::compute(corpus.all());
        let state = LoadState::Ready {
            records: corpus.count(),
        };
        let engine = MatchEngine::with_options(corpus, self.options.clone(), self.weights.clone());

        self.swap(ActiveCorpus {
            engine,
            state: state.clone(),
            metadata,
            stats,
        });
        self.metrics.record_snapshot_loaded();

        tracing::info!(state = ?state, "Search session ready");
        state
    }

    /// Ranked matches against the active corpus.
    pub fn search(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        self.search_detailed(query, limit).results
    }

    /// Like [`SearchSession::search`], also reporting which path answered.
    pub fn search_detailed(&self, query: &str, limit: usize) -> SearchOutcome {
        let active = self.active();
        let timer = SearchTimer::new(self.metrics.clone());
        let outcome = active.engine.search_detailed(query, limit);
        timer.complete(outcome.path, outcome.results.len());
        outcome
    }

    /// The current corpus. Holding the returned `Arc` pins it across a reload.
    pub fn active(&self) -> Arc<ActiveCorpus> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> LoadState {
        self.active().state.clone()
    }

    pub fn stats(&self) -> CorpusStats {
        self.active().stats.clone()
    }

    pub fn metadata(&self) -> SnapshotMetadata {
        self.active().metadata.clone()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn swap(&self, next: ActiveCorpus) {
        let next = Arc::new(next);
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(MatchOptions::default())
    }
}
