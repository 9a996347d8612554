//! Corpus store holding the voter records of one snapshot.

use crate::error::{CorpusError, CorpusResult};
use crate::models::{VoterRecord, VoterRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only collection of voter records in insertion order.
///
/// Populated once via [`CorpusStore::load`]; a new snapshot needs a new store.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    records: Vec<VoterRef>,
}

impl CorpusStore {
    /// Create an empty store. Searching it yields nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, failing on an empty list.
    pub fn from_records(records: Vec<VoterRecord>) -> CorpusResult<Self> {
        let mut store = Self::new();
        store.load(records)?;
        Ok(store)
    }

    /// Populate the store.
    ///
    /// Duplicate identifiers are kept; extraction can legitimately emit them.
    pub fn load(&mut self, records: Vec<VoterRecord>) -> CorpusResult<()> {
        if records.is_empty() {
            return Err(CorpusError::Empty);
        }

        self.records = records.into_iter().map(Arc::new).collect();

        let duplicates = self.duplicate_voter_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                duplicate_count = duplicates.len(),
                "Corpus contains repeated voter identifiers"
            );
        }

        tracing::info!(records = self.records.len(), "Corpus loaded");
        Ok(())
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[VoterRef] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at an insertion position.
    pub fn get(&self, position: usize) -> Option<&VoterRef> {
        self.records.get(position)
    }

    /// First record whose identifier equals `voter_id`, ignoring ASCII case.
    pub fn find_by_voter_id(&self, voter_id: &str) -> Option<&VoterRef> {
        let wanted = voter_id.trim();
        if wanted.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.voter_id.eq_ignore_ascii_case(wanted))
    }

    /// Identifiers that occur more than once, in first-seen order.
    pub fn duplicate_voter_ids(&self) -> Vec<String> {
        duplicate_voter_ids(&self.records)
    }
}

/// Upper-cased identifiers that occur more than once among `records`, in
/// first-seen order. Empty identifiers are ignored.
pub(crate) fn duplicate_voter_ids(records: &[VoterRef]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for record in records {
        if record.voter_id.is_empty() {
            continue;
        }
        let key = record.voter_id.to_ascii_uppercase();
        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(key);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<VoterRecord> {
        vec![
            VoterRecord::new("ABC1234567").with_name_latin("Ravi Kumar"),
            VoterRecord::new("XYZ7654321").with_name_latin("Sita Devi"),
            VoterRecord::new("abc1234567").with_name_latin("Ravi K"),
        ]
    }

    #[test]
    fn test_load_rejects_empty() {
        let mut store = CorpusStore::new();
        assert_eq!(store.load(Vec::new()), Err(CorpusError::Empty));
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let store = CorpusStore::from_records(records()).unwrap();
        assert_eq!(store.count(), 3);
        let ids: Vec<&str> = store.all().iter().map(|r| r.voter_id.as_str()).collect();
        assert_eq!(ids, vec!["ABC1234567", "XYZ7654321", "abc1234567"]);
    }

    #[test]
    fn test_find_by_voter_id_is_case_insensitive_and_first_wins() {
        let store = CorpusStore::from_records(records()).unwrap();
        let found = store.find_by_voter_id("abc1234567").unwrap();
        assert_eq!(found.name_latin, "Ravi Kumar");
        assert!(store.find_by_voter_id("  xyz7654321 ").is_some());
        assert!(store.find_by_voter_id("NOPE").is_none());
        assert!(store.find_by_voter_id("").is_none());
    }

    #[test]
    fn test_duplicates_are_reported_not_removed() {
        let store = CorpusStore::from_records(records()).unwrap();
        assert_eq!(store.duplicate_voter_ids(), vec!["ABC1234567".to_string()]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_get_by_position() {
        let store = CorpusStore::from_records(records()).unwrap();
        assert_eq!(store.get(1).unwrap().voter_id, "XYZ7654321");
        assert!(store.get(3).is_none());
    }
}
