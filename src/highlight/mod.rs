//! Match highlighting for presentation.
//!
//! [`find_spans`] locates literal, case-insensitive occurrences of a query in
//! a field and returns char spans. [`render`] turns spans into markup, and
//! [`highlight`] combines both, falling back to the plain text on any error.

use crate::error::HighlightError;
use crate::models::MatchSpan;
use crate::search::{MatchResult, SearchField};
use regex::RegexBuilder;

/// Queries shorter than this are never highlighted.
pub const MIN_HIGHLIGHT_CHARS: usize = 2;

/// Markers placed around each matched region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub open: String,
    pub close: String,
}

impl Markup {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `<mark>` / `</mark>`.
    pub fn mark() -> Self {
        Self::new("<mark>", "</mark>")
    }

    /// Remove every marker, recovering the plain text.
    ///
    /// Lossy when the original text already contains `open` or `close`:
    /// those occurrences are removed too. Keep the spans from [`find_spans`]
    /// when the exact text matters.
    pub fn strip(&self, annotated: &str) -> String {
        annotated.replace(&self.open, "").replace(&self.close, "")
    }
}

impl Default for Markup {
    fn default() -> Self {
        Self::mark()
    }
}

/// Non-overlapping, case-insensitive occurrences of `query` in `text`, as
/// char offsets.
///
/// The query is escaped, so regex metacharacters match themselves.
pub fn find_spans(text: &str, query: &str) -> Result<Vec<MatchSpan>, HighlightError> {
    if text.is_empty() || query.chars().count() < MIN_HIGHLIGHT_CHARS {
        return Ok(Vec::new());
    }

    let re = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()?;

    let mut spans = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;
    for m in re.find_iter(text) {
        chars_before += text[last_byte..m.start()].chars().count();
        let len = m.as_str().chars().count();
        spans.push(MatchSpan::new(chars_before, chars_before + len));
        chars_before += len;
        last_byte = m.end();
    }

    Ok(spans)
}

/// Wrap each span of `text` in `markup`.
///
/// Spans must be sorted and non-overlapping; out-of-range offsets are clamped
/// and overlapping spans are skipped.
pub fn render(text: &str, spans: &[MatchSpan], markup: &Markup) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * (markup.open.len() + markup.close.len()));
    let mut spans = spans.iter().filter(|s| !s.is_empty()).peekable();
    let mut open_until: Option<usize> = None;

    for (idx, ch) in text.chars().enumerate() {
        if open_until == Some(idx) {
            out.push_str(&markup.close);
            open_until = None;
        }
        if open_until.is_none() {
            while let Some(span) = spans.peek() {
                if span.start < idx {
                    spans.next();
                    continue;
                }
                if span.start == idx {
                    out.push_str(&markup.open);
                    open_until = Some(span.end);
                    spans.next();
                }
                break;
            }
        }
        out.push(ch);
    }

    if open_until.is_some() {
        out.push_str(&markup.close);
    }

    out
}

/// Annotate matches, propagating pattern errors.
pub fn try_highlight(text: &str, query: &str, markup: &Markup) -> Result<String, HighlightError> {
    let spans = find_spans(text, query)?;
    Ok(render(text, &spans, markup))
}

/// Annotate every occurrence of `query` in `text` with `<mark>` tags.
///
/// Returns `text` unchanged when it is empty, when the query is shorter than
/// two characters, or when annotation fails.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, &Markup::mark())
}

/// [`highlight`] with custom markers.
pub fn highlight_with(text: &str, query: &str, markup: &Markup) -> String {
    match try_highlight(text, query, markup) {
        Ok(annotated) => annotated,
        Err(e) => {
            tracing::warn!(error = %e, "Highlight failed, returning plain text");
            text.to_string()
        }
    }
}

/// Annotate one field of a search hit.
///
/// Uses the spans the engine reported for `field`, so approximate matches
/// are marked too. Falls back to literal occurrences of the trimmed query
/// when the field has no spans.
pub fn highlight_field(result: &MatchResult, field: SearchField, query: &str, markup: &Markup) -> String {
    let text = field.value(&result.record);
    match result.spans(field) {
        [] => highlight_with(text, query.trim(), markup),
        spans => render(text, spans, markup),
    }
}
