//! Voter Roll Search - multilingual fuzzy search over electoral-roll records.
//!
//! Given a snapshot of voter records extracted from roll PDFs, this library
//! finds a person's entry from an approximate name (Latin transliteration or
//! native script) or a partial, possibly mistyped, voter identifier.
//!
//! # Architecture
//!
//! - **models**: Voter records, snapshot documents, and match spans
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: Snapshot loading over HTTP or from disk
//! - **corpus**: The immutable record store and coverage statistics
//! - **matching**: Text folding, identifier detection, and approximate matching
//! - **search**: Field weights, the search index, and the match engine
//! - **highlight**: Match spans and markup for presentation
//! - **session**: Load state and atomic corpus reload
//! - **debounce**: Cancellable timer for typed input
//! - **metrics**: Search and load counters

pub mod client;
pub mod config;
pub mod corpus;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod search;
pub mod session;

pub use client::{AsyncSnapshotClient, SnapshotClient, SnapshotLoader, SnapshotSource};
pub use config::Config;
pub use corpus::{CorpusStats, CorpusStore};
pub use debounce::Debouncer;
pub use error::{ConfigError, CorpusError, HighlightError, LoadError, QueryError};
pub use highlight::{highlight, Markup};
pub use matching::{looks_like_voter_id, FuzzyMatcher, MatchOptions};
pub use metrics::{Metrics, MetricsSummary, SearchTimer};
pub use models::{Gender, MatchSpan, Snapshot, SnapshotMetadata, VoterRecord};
pub use search::{
    MatchEngine, MatchResult, SearchField, SearchOutcome, SearchPath, SearchWeights,
    DEFAULT_LIMIT,
};
pub use session::{LoadState, SearchSession};
