//! Searchable index over the weighted voter fields.
//!
//! Each non-empty field of each record becomes one document holding its
//! folded text, normalized field weight, and length norm. Documents are
//! stored grouped by record in corpus order.

use crate::corpus::CorpusStore;
use crate::matching::{fold, FoldedText};
use crate::search::weights::{SearchField, SearchWeights};
use std::time::Instant;

/// One indexed field value.
#[derive(Debug, Clone)]
pub struct IndexedField {
    /// Position of the owning record in the corpus
    pub record: usize,

    /// Which field this text came from
    pub field: SearchField,

    /// Folded text used for matching
    pub text: FoldedText,

    /// Field weight divided by the total weight
    pub weight: f64,

    /// Length norm: shorter fields count more
    pub norm: f64,
}

/// Index over a corpus.
#[derive(Debug, Clone, Default)]
pub struct VoterIndex {
    documents: Vec<IndexedField>,
    records: usize,
}

impl VoterIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every weighted field of every record.
    ///
    /// Empty values are skipped; short values are kept but the matcher will
    /// never accept them on their own.
    pub fn build(corpus: &CorpusStore, weights: &SearchWeights) -> Self {
        let start = Instant::now();
        let mut documents = Vec::with_capacity(corpus.count() * weights.entries().len());

        for (position, record) in corpus.all().iter().enumerate() {
            for entry in weights.entries() {
                let raw = entry.field().value(record);
                if raw.trim().is_empty() {
                    continue;
                }

                let text = fold(raw);
                if text.is_empty() {
                    continue;
                }

                documents.push(IndexedField {
                    record: position,
                    field: entry.field(),
                    text,
                    weight: weights.normalized(entry.field()).unwrap_or(0.0),
                    norm: field_norm(raw),
                });
            }
        }

        tracing::info!(
            records = corpus.count(),
            documents = documents.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search index built"
        );

        Self {
            documents,
            records: corpus.count(),
        }
    }

    /// All documents, grouped by record in corpus order.
    pub fn documents(&self) -> &[IndexedField] {
        &self.documents
    }

    /// Get the number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of records the index was built from.
    pub fn record_count(&self) -> usize {
        self.records
    }
}

/// `1 / sqrt(token count)`, rounded to three decimals.
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split_whitespace().count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
