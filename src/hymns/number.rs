//! Hymn numbers with an optional letter suffix ("355", "355a").

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Well-formed record numbers: digits followed by at most one lowercase letter.
static RECORD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([a-z])?$").expect("record number pattern"));

/// Query numbers allow whitespace between the digits and the letter ("355 a").
static QUERY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([a-z])?$").expect("query number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HymnNumber {
    pub numeric: u64,
    pub letter: Option<char>,
}

impl HymnNumber {
    /// Parse a record's `hymnNumber` field.
    ///
    /// Returns `None` for anything that is not `^\d+[a-z]?$`, including
    /// values whose digits overflow `u64`. Malformed numbers simply never
    /// take part in number matching.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_captures(&RECORD_NUMBER, raw)
    }

    /// Parse free-text user input as a hymn number.
    ///
    /// The input is trimmed and lowercased first, so `" 355A "` and
    /// `"355 a"` both parse as `355a`.
    #[must_use]
    pub fn parse_query(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().to_lowercase();
        Self::from_captures(&QUERY_NUMBER, &cleaned)
    }

    /// Whether a query looks like a bare hymn number.
    #[must_use]
    pub fn is_number_query(raw: &str) -> bool {
        Self::parse_query(raw).is_some()
    }

    /// A record number satisfies a query number when the numeric parts are
    /// equal and the query either has no letter or the same letter.
    #[must_use]
    pub fn satisfies(&self, query: &Self) -> bool {
        self.numeric == query.numeric && query.letter.is_none_or(|l| self.letter == Some(l))
    }

    fn from_captures(pattern: &Regex, text: &str) -> Option<Self> {
        let caps = pattern.captures(text)?;
        let numeric = caps.get(1)?.as_str().parse::<u64>().ok()?;
        let letter = caps.get(2).and_then(|m| m.as_str().chars().next());
        Some(Self { numeric, letter })
    }
}

impl fmt::Display for HymnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            Some(letter) => write!(f, "{}{letter}", self.numeric),
            None => write!(f, "{}", self.numeric),
        }
    }
}

/// Ordering key for a raw hymn number: all of its digits read as one
/// integer, `0` when there are none.
#[must_use]
pub fn sort_key(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
