//! Searchable fields and their relative weights.

use crate::models::VoterRecord;
use serde::{Deserialize, Serialize};

/// A voter field that participates in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    VoterId,
    NameLatin,
    NameLocal,
    RelativeNameLatin,
    RelativeNameLocal,
    HouseNumber,
}

impl SearchField {
    /// Every searchable field, in index order.
    pub const ALL: [SearchField; 6] = [
        SearchField::VoterId,
        SearchField::NameLatin,
        SearchField::NameLocal,
        SearchField::RelativeNameLatin,
        SearchField::RelativeNameLocal,
        SearchField::HouseNumber,
    ];

    /// Get display name for the field.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VoterId => "voter ID",
            Self::NameLatin => "name",
            Self::NameLocal => "name (local script)",
            Self::RelativeNameLatin => "relative name",
            Self::RelativeNameLocal => "relative name (local script)",
            Self::HouseNumber => "house number",
        }
    }

    /// The field's text on a record.
    pub fn value<'a>(&self, record: &'a VoterRecord) -> &'a str {
        match self {
            Self::VoterId => &record.voter_id,
            Self::NameLatin => &record.name_latin,
            Self::NameLocal => &record.name_local,
            Self::RelativeNameLatin => &record.relative_name_latin,
            Self::RelativeNameLocal => &record.relative_name_local,
            Self::HouseNumber => &record.house_number,
        }
    }
}

/// A field paired with its relative importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWeight {
    field: SearchField,
    weight: f64,
}

impl SearchWeight {
    /// Returns `None` unless `weight` is finite and positive.
    pub fn new(field: SearchField, weight: f64) -> Option<Self> {
        (weight.is_finite() && weight > 0.0).then_some(Self { field, weight })
    }

    pub fn field(&self) -> SearchField {
        self.field
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The weighted field set the index is built over.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchWeights {
    entries: Vec<SearchWeight>,
}

impl SearchWeights {
    /// Build from entries. A repeated field keeps its last weight.
    pub fn new(entries: impl IntoIterator<Item = SearchWeight>) -> Self {
        let mut deduped: Vec<SearchWeight> = Vec::new();
        for entry in entries {
            match deduped.iter_mut().find(|e| e.field == entry.field) {
                Some(existing) => existing.weight = entry.weight,
                None => deduped.push(entry),
            }
        }
        Self { entries: deduped }
    }

    pub fn entries(&self) -> &[SearchWeight] {
        &self.entries
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Raw weight for a field, if it is searched.
    pub fn weight(&self, field: SearchField) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.weight)
    }

    /// Weight divided by the total, so all weights sum to 1.
    pub fn normalized(&self, field: SearchField) -> Option<f64> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        self.weight(field).map(|w| w / total)
    }
}

impl Default for SearchWeights {
    fn default() -> Self {
        let defaults = [
            (SearchField::VoterId, 2.0),
            (SearchField::NameLatin, 1.5),
            (SearchField::NameLocal, 1.5),
            (SearchField::RelativeNameLatin, 0.8),
            (SearchField::RelativeNameLocal, 0.8),
            (SearchField::HouseNumber, 0.6),
        ];
        Self::new(
            defaults
                .into_iter()
                .filter_map(|(field, weight)| SearchWeight::new(field, weight)),
        )
    }
}
