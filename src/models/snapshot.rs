//! Snapshot document produced by the roll extraction pipeline.

use crate::models::VoterRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Extraction metadata carried alongside the voter list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SnapshotMetadata {
    /// Source PDF files that contributed records
    pub pdfs_processed: Vec<String>,

    /// When the extraction ran (ISO 8601, usually without a timezone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<String>,

    /// Record count reported by the extractor
    pub total_voters: usize,

    /// Free-text description of the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SnapshotMetadata {
    /// Parse `extracted_at`, accepting both naive and offset timestamps.
    pub fn extracted_at(&self) -> Option<NaiveDateTime> {
        let raw = self.extracted_at.as_deref()?.trim();
        raw.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }
}

/// The whole snapshot: `{ "voters": [...], "metadata": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Snapshot {
    pub voters: Vec<VoterRecord>,
    pub metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_voters_defaults_to_empty() {
        let snapshot = Snapshot::from_json(r#"{"metadata": {"pdfs_processed": ["a.pdf"]}}"#).unwrap();
        assert!(snapshot.voters.is_empty());
        assert_eq!(snapshot.metadata.pdfs_processed, vec!["a.pdf".to_string()]);
        assert_eq!(snapshot.metadata.total_voters, 0);
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let snapshot = Snapshot::from_json(r#"{"voters": [{"voter_id": "AB1"}]}"#).unwrap();
        assert_eq!(snapshot.voters.len(), 1);
        assert!(snapshot.metadata.pdfs_processed.is_empty());
        assert_eq!(snapshot.metadata.extracted_at(), None);
    }

    #[test]
    fn test_extracted_at_parsing() {
        let metadata = SnapshotMetadata {
            extracted_at: Some("2024-03-01T10:15:30.123456".to_string()),
            ..Default::default()
        };
        let parsed = metadata.extracted_at().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2024-03-01");

        let metadata = SnapshotMetadata {
            extracted_at: Some("2024-03-01T10:15:30+05:30".to_string()),
            ..Default::default()
        };
        assert!(metadata.extracted_at().is_some());

        let metadata = SnapshotMetadata {
            extracted_at: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.extracted_at(), None);
    }

    #[test]
    fn test_empty_document() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
