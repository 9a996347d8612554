//! Voter identifier detection.
//!
//! A query shaped like the start of an identifier (2-3 letters then a digit)
//! takes the exact-prefix fast path instead of fuzzy matching. Changing the
//! pattern changes which queries bypass fuzzy ranking.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern anchoring the identifier fast path. ASCII digits only: the
/// `regex` crate's `\d` also accepts Malayalam and other Unicode digits.
pub const VOTER_ID_PATTERN: &str = r"^[A-Za-z]{2,3}[0-9]";

static VOTER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(VOTER_ID_PATTERN).unwrap());

/// Does `query` look like the beginning of a voter identifier?
pub fn looks_like_voter_id(query: &str) -> bool {
    VOTER_ID_RE.is_match(query)
}

/// Case-insensitive prefix test of an identifier.
///
/// Identifiers are ASCII by construction; non-ASCII input simply never matches.
pub fn voter_id_has_prefix(voter_id: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && voter_id.len() >= prefix.len()
        && voter_id.is_char_boundary(prefix.len())
        && voter_id[..prefix.len()].eq_ignore_ascii_case(prefix)
}
