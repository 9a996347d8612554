//! Query execution over an indexed voter corpus.
//!
//! A search takes one of two paths:
//! - Identifier: the query looks like the start of a voter ID, and at least
//!   one identifier has it as a prefix. Hits come back in corpus order with
//!   score 0.
//! - Fuzzy: every weighted field is matched approximately and the per-field
//!   scores are folded into one record score (lower is better).

use crate::corpus::CorpusStore;
use crate::error::{QueryError, QueryResult};
use crate::matching::{looks_like_voter_id, voter_id_has_prefix, FuzzyMatcher, MatchOptions};
use crate::models::{MatchSpan, VoterRef};
use crate::search::voter_index::VoterIndex;
use crate::search::weights::{SearchField, SearchWeights};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of results returned by a search.
pub const DEFAULT_LIMIT: usize = 100;

/// Queries shorter than this (after trimming) are never searched.
pub const MIN_QUERY_CHARS: usize = 2;

/// Floor for a perfect field score so it still carries weight in the product.
const PERFECT_SCORE_FLOOR: f64 = f64::EPSILON;

/// Which path answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPath {
    Identifier,
    Fuzzy,
    Rejected,
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub record: VoterRef,

    /// 0.0 is best; larger is worse
    pub score: f64,

    /// Matched char ranges per field, in the field's original text
    pub matched_field_spans: BTreeMap<SearchField, Vec<MatchSpan>>,
}

impl MatchResult {
    /// Spans for one field, empty if it did not match.
    pub fn spans(&self, field: SearchField) -> &[MatchSpan] {
        self.matched_field_spans
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Results plus the path that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub path: SearchPath,
    pub results: Vec<MatchResult>,
}

impl SearchOutcome {
    fn rejected() -> Self {
        Self {
            path: SearchPath::Rejected,
            results: Vec::new(),
        }
    }
}

/// Per-record accumulator for the fuzzy path.
struct Candidate {
    score: f64,
    spans: BTreeMap<SearchField, Vec<MatchSpan>>,
}

/// Search engine owning a corpus and the index built over it.
///
/// Immutable after construction; a new snapshot means a new engine.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    corpus: CorpusStore,
    index: VoterIndex,
    matcher: FuzzyMatcher,
    weights: SearchWeights,
}

impl MatchEngine {
    /// Index a corpus with the default options and field weights.
    pub fn new(corpus: CorpusStore) -> Self {
        Self::with_options(corpus, MatchOptions::default(), SearchWeights::default())
    }

    /// Index a corpus with explicit options and weights.
    pub fn with_options(corpus: CorpusStore, options: MatchOptions, weights: SearchWeights) -> Self {
        let index = VoterIndex::build(&corpus, &weights);
        Self {
            corpus,
            index,
            matcher: FuzzyMatcher::new(options),
            weights,
        }
    }

    /// An engine over no records. Every search returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn index(&self) -> &VoterIndex {
        &self.index
    }

    pub fn options(&self) -> &MatchOptions {
        self.matcher.options()
    }

    pub fn weights(&self) -> &SearchWeights {
        &self.weights
    }

    /// Ranked matches for `query`, at most `limit` of them.
    pub fn search(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        self.search_detailed(query, limit).results
    }

    /// Like [`MatchEngine::search`], also reporting which path answered.
    pub fn search_detailed(&self, query: &str, limit: usize) -> SearchOutcome {
        let query = match prepare_query(query) {
            Ok(q) => q,
            Err(e) => {
                tracing::debug!(reason = %e, "Query rejected");
                return SearchOutcome::rejected();
            }
        };

        if looks_like_voter_id(query) {
            if let Some(results) = self.identifier_matches(query, limit) {
                tracing::debug!(
                    query = %query,
                    results = results.len(),
                    "Identifier prefix search"
                );
                return SearchOutcome {
                    path: SearchPath::Identifier,
                    results,
                };
            }
            tracing::debug!(query = %query, "No identifier prefix hit, falling back to fuzzy");
        }

        let results = self.fuzzy_matches(query, limit);
        tracing::debug!(query = %query, results = results.len(), "Fuzzy search");
        SearchOutcome {
            path: SearchPath::Fuzzy,
            results,
        }
    }

    /// Case-insensitive prefix scan of every identifier, in corpus order.
    ///
    /// `None` when no identifier has the prefix. A hit decides the path even
    /// if `limit` leaves nothing to return.
    fn identifier_matches(&self, query: &str, limit: usize) -> Option<Vec<MatchResult>> {
        let span = MatchSpan::new(0, query.chars().count());

        let mut hits = self
            .corpus
            .all()
            .iter()
            .filter(|record| voter_id_has_prefix(&record.voter_id, query))
            .peekable();
        hits.peek()?;

        let results = hits
            .take(limit)
            .map(|record| MatchResult {
                record: record.clone(),
                score: 0.0,
                matched_field_spans: BTreeMap::from([(SearchField::VoterId, vec![span])]),
            })
            .collect();
        Some(results)
    }

    /// Approximate match over all indexed fields.
    ///
    /// Record score is the product of `score ^ (weight * norm)` over its
    /// matching fields. Ties keep corpus order.
    fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        let Some(pattern) = self.matcher.compile(query) else {
            return Vec::new();
        };

        let mut candidates: BTreeMap<usize, Candidate> = BTreeMap::new();

        for doc in self.index.documents() {
            let Some(field_match) = self.matcher.match_folded(&pattern, &doc.text) else {
                continue;
            };

            let base = field_match.score.max(PERFECT_SCORE_FLOOR);
            let factor = base.powf(doc.weight * doc.norm);

            let candidate = candidates.entry(doc.record).or_insert_with(|| Candidate {
                score: 1.0,
                spans: BTreeMap::new(),
            });
            candidate.score *= factor;
            candidate.spans.insert(doc.field, field_match.spans);
        }

        let mut ranked: Vec<(usize, Candidate)> = candidates.into_iter().collect();
        // BTreeMap iteration already yields corpus order; a stable sort keeps it for ties.
        ranked.sort_by(|(_, a), (_, b)| a.score.total_cmp(&b.score));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .filter_map(|(position, candidate)| {
                self.corpus.get(position).map(|record| MatchResult {
                    record: record.clone(),
                    score: candidate.score,
                    matched_field_spans: candidate.spans,
                })
            })
            .collect()
    }
}

/// Trim and length-check a raw query.
fn prepare_query(query: &str) -> QueryResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(QueryError::Empty);
    }

    let actual = trimmed.chars().count();
    if actual < MIN_QUERY_CHARS {
        return Err(QueryError::TooShort {
            min: MIN_QUERY_CHARS,
            actual,
        });
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoterRecord;

    fn engine(records: Vec<VoterRecord>) -> MatchEngine {
        MatchEngine::new(CorpusStore::from_records(records).unwrap())
    }

    #[test]
    fn test_prepare_query() {
        assert_eq!(prepare_query("  ravi "), Ok("ravi"));
        assert_eq!(prepare_query("   "), Err(QueryError::Empty));
        assert_eq!(
            prepare_query(" a "),
            Err(QueryError::TooShort { min: 2, actual: 1 })
        );
        assert_eq!(prepare_query("രവി"), Ok("രവി"));
    }

    #[test]
    fn test_identifier_path() {
        let engine = engine(vec![
            VoterRecord::new("ABC1234567").with_name_latin("Ravi Kumar"),
            VoterRecord::new("ABD1234567").with_name_latin("Sita"),
            VoterRecord::new("abc1239999").with_name_latin("Gopal"),
        ]);

        let outcome = engine.search_detailed("abc123", DEFAULT_LIMIT);
        assert_eq!(outcome.path, SearchPath::Identifier);
        let ids: Vec<&str> = outcome
            .results
            .iter()
            .map(|r| r.record.voter_id.as_str())
            .collect();
        assert_eq!(ids, vec!["ABC1234567", "abc1239999"]);
        assert!(outcome.results.iter().all(|r| r.score == 0.0));
        assert_eq!(
            outcome.results[0].spans(SearchField::VoterId),
            &[MatchSpan::new(0, 6)]
        );
    }

    #[test]
    fn test_identifier_path_respects_limit() {
        let engine = engine(vec![
            VoterRecord::new("ABC1000001"),
            VoterRecord::new("ABC1000002"),
            VoterRecord::new("ABC1000003"),
        ]);
        let results = engine.search("ABC1", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].record.voter_id, "ABC1000002");
    }

    #[test]
    fn test_identifier_hit_with_zero_limit_stays_on_identifier_path() {
        let engine = engine(vec![VoterRecord::new("ABC1234567").with_name_latin("Ravi")]);
        let outcome = engine.search_detailed("ABC123", 0);
        assert_eq!(outcome.path, SearchPath::Identifier);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_malayalam_digit_query_uses_fuzzy_path() {
        let engine = engine(vec![VoterRecord::new("AB\u{0D67}23").with_name_latin("Ravi")]);
        let outcome = engine.search_detailed("AB\u{0D67}", DEFAULT_LIMIT);
        assert_eq!(outcome.path, SearchPath::Fuzzy);
        assert!(outcome.results.iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn test_identifier_miss_falls_back_to_fuzzy() {
        let engine = engine(vec![VoterRecord::new("ABC1234567").with_name_latin("Ravi")]);
        let outcome = engine.search_detailed("ABX1234567", DEFAULT_LIMIT);
        assert_eq!(outcome.path, SearchPath::Fuzzy);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].score > 0.0);
    }

    #[test]
    fn test_fuzzy_ranks_better_matches_first() {
        let engine = engine(vec![
            VoterRecord::new("XYZ0000001").with_name_latin("Raveendran Nair"),
            VoterRecord::new("XYZ0000002").with_name_latin("Ravi"),
        ]);
        let results = engine.search("ravi", DEFAULT_LIMIT);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].record.voter_id, "XYZ0000002");
        assert!(results[0].score <= results[1].score);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let engine = engine(vec![
            VoterRecord::new("XYZ0000003").with_name_latin("Anil"),
            VoterRecord::new("XYZ0000001").with_name_latin("Anil"),
            VoterRecord::new("XYZ0000002").with_name_latin("Anil"),
        ]);
        let ids: Vec<String> = engine
            .search("anil", DEFAULT_LIMIT)
            .into_iter()
            .map(|r| r.record.voter_id.clone())
            .collect();
        assert_eq!(ids, vec!["XYZ0000003", "XYZ0000001", "XYZ0000002"]);
    }

    #[test]
    fn test_spans_reported_per_field() {
        let engine = engine(vec![VoterRecord::new("XYZ9999999")
            .with_name_latin("Ravi Kumar")
            .with_relative("Ravi Shankar", "", "Father's Name")]);
        let results = engine.search("ravi", DEFAULT_LIMIT);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].spans(SearchField::NameLatin),
            &[MatchSpan::new(0, 4)]
        );
        assert_eq!(
            results[0].spans(SearchField::RelativeNameLatin),
            &[MatchSpan::new(0, 4)]
        );
        assert!(results[0].spans(SearchField::VoterId).is_empty());
    }

    #[test]
    fn test_short_query_rejected() {
        let engine = engine(vec![VoterRecord::new("XYZ1").with_name_latin("a")]);
        let outcome = engine.search_detailed("a", DEFAULT_LIMIT);
        assert_eq!(outcome.path, SearchPath::Rejected);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_numeric_query_uses_fuzzy_path() {
        let engine = engine(vec![VoterRecord::new("XYZ1").with_house_number("142")]);
        let outcome = engine.search_detailed("142", DEFAULT_LIMIT);
        assert_eq!(outcome.path, SearchPath::Fuzzy);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_special_characters_are_literal() {
        let engine = engine(vec![VoterRecord::new("XYZ1").with_house_number("12/4 (A)")]);
        assert_eq!(engine.search("(A)", DEFAULT_LIMIT).len(), 1);
        assert!(engine.search(".*", DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_empty_engine() {
        let engine = MatchEngine::empty();
        assert!(engine.search("ravi", DEFAULT_LIMIT).is_empty());
        assert!(engine.search("ABC123", DEFAULT_LIMIT).is_empty());
        assert_eq!(engine.corpus().count(), 0);
    }

    #[test]
    fn test_limit_truncates_fuzzy_results() {
        let records = (0..10)
            .map(|i| VoterRecord::new(format!("XYZ{:07}", i)).with_name_latin("Mohan"))
            .collect();
        let engine = engine(records);
        assert_eq!(engine.search("mohan", 3).len(), 3);
    }
}
