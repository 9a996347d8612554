//! Data models for electoral-roll entities.
//!
//! This module contains the voter record, the snapshot document the
//! extraction pipeline produces, and match spans used for highlighting.

pub mod snapshot;
pub mod span;
pub mod voter;

pub use snapshot::{Snapshot, SnapshotMetadata};
pub use span::MatchSpan;
pub use voter::{Gender, VoterRecord, VoterRef};
