//! The immutable voter corpus for a session.
//!
//! This module provides the record store the engine indexes, plus coverage
//! statistics for a loaded roll.

pub mod stats;
pub mod store;

pub use stats::CorpusStats;
pub use store::CorpusStore;
