//! Weighted multi-field search over the voter corpus.
//!
//! This module provides the field weights, the index built once per corpus,
//! and the engine that answers queries through the identifier fast path or
//! approximate matching.

pub mod engine;
pub mod voter_index;
pub mod weights;

pub use engine::{
    MatchEngine, MatchResult, SearchOutcome, SearchPath, DEFAULT_LIMIT, MIN_QUERY_CHARS,
};
pub use voter_index::{field_norm, IndexedField, VoterIndex};
pub use weights::{SearchField, SearchWeight, SearchWeights};
