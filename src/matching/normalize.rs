//! Case and diacritic folding with a map back to original character offsets.
//!
//! Matching happens on folded text, highlighting happens on the original, so
//! every folded char keeps the index of the original char it came from.

use unicode_normalization::char::decompose_canonical;

const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';
const MALAYALAM_VIRAMA: char = '\u{0D4D}';

/// Text after folding, with provenance for each char.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FoldedText {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl FoldedText {
    /// Folded characters.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Original char index of the folded char at `idx`.
    pub fn origin(&self, idx: usize) -> usize {
        self.origin[idx]
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Map a half-open folded range to a half-open original char range.
    pub fn original_range(&self, start: usize, end: usize) -> (usize, usize) {
        debug_assert!(start < end && end <= self.len());
        (self.origin[start], self.origin[end - 1] + 1)
    }

    /// Folded text as a `String`, mostly for diagnostics and tests.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Fold `text` for case-insensitive, diacritic-tolerant comparison.
///
/// - canonical decomposition (NFD), so composed and decomposed input agree
/// - combining diacritical marks (U+0300..U+036F) and ZWJ/ZWNJ are dropped
/// - Malayalam atomic chillu letters become consonant + virama
/// - lowercase
/// - whitespace runs collapse to a single space; leading/trailing whitespace is dropped
pub fn fold(text: &str) -> FoldedText {
    let mut folded = FoldedText::default();
    let mut pending_space: Option<usize> = None;

    for (idx, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            if !folded.is_empty() && pending_space.is_none() {
                pending_space = Some(idx);
            }
            continue;
        }

        let mut emitted = false;
        let emit = |ch: char, folded: &mut FoldedText| {
            for lower in ch.to_lowercase() {
                folded.chars.push(lower);
                folded.origin.push(idx);
            }
        };

        // Flush the collapsed space before the first char we keep.
        let flush = |folded: &mut FoldedText, pending: &mut Option<usize>| {
            if let Some(space_idx) = pending.take() {
                folded.chars.push(' ');
                folded.origin.push(space_idx);
            }
        };

        if let Some(consonant) = chillu_base(c) {
            flush(&mut folded, &mut pending_space);
            emit(consonant, &mut folded);
            emit(MALAYALAM_VIRAMA, &mut folded);
            continue;
        }

        decompose_canonical(c, |d| {
            if is_ignorable(d) {
                return;
            }
            if !emitted {
                flush(&mut folded, &mut pending_space);
                emitted = true;
            }
            emit(d, &mut folded);
        });
    }

    folded
}

/// Fold to a plain `String`.
pub fn fold_str(text: &str) -> String {
    fold(text).as_string()
}

fn is_ignorable(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | ZERO_WIDTH_NON_JOINER | ZERO_WIDTH_JOINER)
}

/// Atomic chillu letters have no canonical decomposition but are typed
/// interchangeably with consonant + virama (+ ZWJ).
fn chillu_base(c: char) -> Option<char> {
    match c {
        '\u{0D7A}' => Some('\u{0D23}'), // ൺ → ണ
        '\u{0D7B}' => Some('\u{0D28}'), // ൻ → ന
        '\u{0D7C}' => Some('\u{0D30}'), // ർ → ര
        '\u{0D7D}' => Some('\u{0D32}'), // ൽ → ല
        '\u{0D7E}' => Some('\u{0D33}'), // ൾ → ള
        '\u{0D7F}' => Some('\u{0D15}'), // ൿ → ക
        _ => None,
    }
}
