//! Field coverage and distribution summary for a loaded roll.
//!
//! Extraction quality varies page to page; these numbers show how many
//! records actually carry each searchable field.

use crate::corpus::store::duplicate_voter_ids;
use crate::models::{Gender, VoterRef};
use serde::Serialize;
use std::fmt;

/// Coverage counts over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub total: usize,
    pub with_voter_id: usize,
    pub with_name_local: usize,
    pub with_name_latin: usize,
    pub with_age: usize,
    pub with_house_number: usize,
    pub with_gender: usize,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub male: usize,
    pub female: usize,
    pub duplicate_voter_ids: usize,
}

impl CorpusStats {
    /// Compute stats in a single pass.
    pub fn compute(records: &[VoterRef]) -> Self {
        let mut stats = CorpusStats {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            if !record.voter_id.is_empty() {
                stats.with_voter_id += 1;
            }
            if !record.name_local.is_empty() {
                stats.with_name_local += 1;
            }
            if !record.name_latin.is_empty() {
                stats.with_name_latin += 1;
            }
            if !record.house_number.is_empty() {
                stats.with_house_number += 1;
            }
            if let Some(age) = record.age {
                stats.with_age += 1;
                stats.min_age = Some(stats.min_age.map_or(age, |min| min.min(age)));
                stats.max_age = Some(stats.max_age.map_or(age, |max| max.max(age)));
            }
            match record.gender {
                Gender::Male => stats.male += 1,
                Gender::Female => stats.female += 1,
                Gender::Unknown => {}
            }
        }

        stats.with_gender = stats.male + stats.female;
        stats.duplicate_voter_ids = duplicate_voter_ids(records).len();
        stats
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total voters: {}", self.total)?;
        writeln!(f, "Records with voter ID: {}", self.with_voter_id)?;
        writeln!(f, "Records with local name: {}", self.with_name_local)?;
        writeln!(f, "Records with Latin name: {}", self.with_name_latin)?;
        writeln!(f, "Records with age: {}", self.with_age)?;
        writeln!(f, "Records with house number: {}", self.with_house_number)?;
        writeln!(f, "Records with gender: {}", self.with_gender)?;
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            writeln!(f, "Age range: {} - {}", min, max)?;
        }
        writeln!(f, "Male: {}, Female: {}", self.male, self.female)?;
        write!(f, "Repeated voter IDs: {}", self.duplicate_voter_ids)
    }
}
