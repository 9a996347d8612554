//! Approximate string matching for voter fields.
//!
//! This module provides typo-tolerant matching with:
//! - Semi-global alignment: the query may match anywhere inside a field
//! - Optimal string alignment distance (insert, delete, substitute, adjacent swap)
//! - A normalized 0-1 score (0 is an exact match)
//! - Character spans of the aligned region for highlighting

use crate::matching::normalize::{fold, FoldedText};
use crate::models::MatchSpan;

/// Tuning knobs for the approximate matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    /// Maximum accepted score (0.0 exact only, 1.0 anything)
    pub threshold: f64,

    /// How far a match may drift from `location` before the score hits 1.0
    pub distance: usize,

    /// Expected match position, in folded chars
    pub location: usize,

    /// Ignore match position entirely
    pub ignore_location: bool,

    /// Queries and field values shorter than this never match
    pub min_match_char_length: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            distance: 1000,
            location: 0,
            ignore_location: true,
            min_match_char_length: 2,
        }
    }
}

/// A compiled query.
///
/// The query is taken literally; no character has operator meaning.
#[derive(Debug, Clone)]
pub struct Pattern {
    folded: FoldedText,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        self.folded.chars()
    }
}

/// Outcome of matching one pattern against one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// 0.0 is a perfect match, `threshold` is the worst accepted
    pub score: f64,

    /// Edit operations in the best alignment
    pub errors: usize,

    /// Matched character ranges in the original (unfolded) text
    pub spans: Vec<MatchSpan>,
}

/// Alignment of the pattern against a window of the text.
struct Alignment {
    errors: usize,
    start: usize,
    end: usize,
    matched: Vec<usize>,
}

/// Approximate matcher with configurable tolerance.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    options: MatchOptions,
}

impl FuzzyMatcher {
    /// Create a new FuzzyMatcher.
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Compile a query. Returns `None` when the folded query is shorter than
    /// the minimum match length.
    pub fn compile(&self, query: &str) -> Option<Pattern> {
        let folded = fold(query);
        if folded.is_empty() || folded.len() < self.options.min_match_char_length {
            return None;
        }
        Some(Pattern { folded })
    }

    /// Match raw strings. Convenience for callers without an index.
    pub fn match_text(&self, query: &str, text: &str) -> Option<FieldMatch> {
        let pattern = self.compile(query)?;
        self.match_folded(&pattern, &fold(text))
    }

    /// Match a compiled pattern against folded field text.
    pub fn match_folded(&self, pattern: &Pattern, text: &FoldedText) -> Option<FieldMatch> {
        let m = pattern.len();
        let n = text.len();
        if m == 0 || n < self.options.min_match_char_length {
            return None;
        }

        let max_errors = (self.options.threshold * m as f64).floor() as usize;
        // Fewer text chars than pattern chars costs at least the difference.
        if n + max_errors < m {
            return None;
        }

        let table = AlignmentTable::build(pattern.chars(), text.chars());

        let mut best: Option<(f64, Alignment)> = None;
        for end in 1..=n {
            let errors = table.get(m, end);
            if errors > max_errors {
                continue;
            }
            if self.options.ignore_location {
                if let Some((_, ref current)) = best {
                    if errors >= current.errors {
                        continue;
                    }
                }
            }

            let alignment = table.trace(pattern.chars(), text.chars(), end);
            let score = self.score(alignment.errors, m, alignment.start);
            if score > self.options.threshold {
                continue;
            }
            let better = match best {
                Some((best_score, _)) => score < best_score,
                None => true,
            };
            if better {
                best = Some((score, alignment));
            }
        }

        let (score, alignment) = best?;
        let spans = self.spans_for(&alignment, text);

        Some(FieldMatch {
            score,
            errors: alignment.errors,
            spans,
        })
    }

    /// Accuracy (errors per pattern char), plus a positional penalty when
    /// location matters.
    fn score(&self, errors: usize, pattern_len: usize, start: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        if self.options.ignore_location {
            return accuracy;
        }

        let proximity = start.abs_diff(self.options.location);
        if self.options.distance == 0 {
            return if proximity > 0 { 1.0 } else { accuracy };
        }

        accuracy + proximity as f64 / self.options.distance as f64
    }

    /// Runs of exactly matched chars, mapped back to original offsets.
    ///
    /// Runs shorter than the minimum match length are dropped; if nothing
    /// survives, the whole aligned window is reported instead.
    fn spans_for(&self, alignment: &Alignment, text: &FoldedText) -> Vec<MatchSpan> {
        let mut positions = alignment.matched.clone();
        positions.sort_unstable();
        positions.dedup();

        let mut runs: Vec<(usize, usize)> = Vec::new();
        for pos in positions {
            match runs.last_mut() {
                Some((_, end)) if *end == pos => *end = pos + 1,
                _ => runs.push((pos, pos + 1)),
            }
        }

        let mut spans: Vec<MatchSpan> = runs
            .into_iter()
            .filter(|(start, end)| end - start >= self.options.min_match_char_length)
            .map(|(start, end)| {
                let (s, e) = text.original_range(start, end);
                MatchSpan::new(s, e)
            })
            .collect();

        if spans.is_empty() && alignment.start < alignment.end {
            let (s, e) = text.original_range(alignment.start, alignment.end);
            spans.push(MatchSpan::new(s, e));
        }

        spans
    }
}

/// Dynamic-programming table for semi-global optimal string alignment.
///
/// Row `i` is the pattern prefix of length `i`; column `j` is the text prefix
/// of length `j`. Row 0 is all zeros so a match may start anywhere.
struct AlignmentTable {
    width: usize,
    cells: Vec<usize>,
}

impl AlignmentTable {
    fn build(pattern: &[char], text: &[char]) -> Self {
        let m = pattern.len();
        let n = text.len();
        let width = n + 1;
        let mut cells = vec![0usize; (m + 1) * width];

        for i in 1..=m {
            cells[i * width] = i;
            for j in 1..=n {
                let cost = usize::from(pattern[i - 1] != text[j - 1]);
                let mut best = (cells[(i - 1) * width + j - 1] + cost)
                    .min(cells[(i - 1) * width + j] + 1)
                    .min(cells[i * width + j - 1] + 1);

                if i > 1 && j > 1 && pattern[i - 1] == text[j - 2] && pattern[i - 2] == text[j - 1]
                {
                    best = best.min(cells[(i - 2) * width + j - 2] + 1);
                }

                cells[i * width + j] = best;
            }
        }

        Self { width, cells }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }

    /// Walk back from `(pattern.len(), end)` to recover the window start and
    /// the text positions that matched exactly.
    fn trace(&self, pattern: &[char], text: &[char], end: usize) -> Alignment {
        let mut i = pattern.len();
        let mut j = end;
        let errors = self.get(i, j);
        let mut matched = Vec::new();

        while i > 0 {
            let current = self.get(i, j);

            if j > 0 && pattern[i - 1] == text[j - 1] && current == self.get(i - 1, j - 1) {
                matched.push(j - 1);
                i -= 1;
                j -= 1;
            } else if i > 1
                && j > 1
                && pattern[i - 1] == text[j - 2]
                && pattern[i - 2] == text[j - 1]
                && current == self.get(i - 2, j - 2) + 1
            {
                matched.push(j - 1);
                matched.push(j - 2);
                i -= 2;
                j -= 2;
            } else if j > 0 && current == self.get(i - 1, j - 1) + 1 {
                i -= 1;
                j -= 1;
            } else if current == self.get(i - 1, j) + 1 {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        Alignment {
            errors,
            start: j,
            end,
            matched,
        }
    }
}
