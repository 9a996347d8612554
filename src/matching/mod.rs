//! Approximate matching utilities for voter search.
//!
//! This module provides text folding, the voter identifier predicate, and the
//! typo-tolerant matcher used by the search engine.

pub mod fuzzy_matcher;
pub mod identifier;
pub mod normalize;

pub use fuzzy_matcher::{FieldMatch, FuzzyMatcher, MatchOptions, Pattern};
pub use identifier::{looks_like_voter_id, voter_id_has_prefix, VOTER_ID_PATTERN};
pub use normalize::{fold, fold_str, FoldedText};
