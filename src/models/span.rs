//! Character ranges used for highlighting.

use serde::{Deserialize, Serialize};

/// Half-open range of character (Unicode scalar) offsets into a field's text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The covered substring of `text`, by character offsets.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
        let start = indices.nth(self.start).unwrap_or(text.len());
        let end = if self.is_empty() {
            start
        } else {
            indices.nth(self.len() - 1).unwrap_or(text.len())
        };
        &text[start..end]
    }
}
