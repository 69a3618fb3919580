//! Token-overlap hymn matcher.
//!
//! A pure filter over a hymn slice: it never reorders, never mutates and
//! never fails. Free text is matched by substring containment first and by
//! word overlap second; number queries compare the numeric part and the
//! optional letter suffix of `hymnNumber`.

use tracing::debug;

use crate::hymns::{HymnNumber, HymnRecord};
use crate::search::filters::passes_filters;
use crate::search::{SearchOptions, SearchType};

/// Characters removed before text comparison.
pub const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Lowercase and strip [`PUNCTUATION`].
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect()
}

/// A free-text query prepared for matching against normalized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Punctuation removed outright: "amazing-grace" -> "amazinggrace".
    pub joined: String,
    /// Punctuation treated as a word break: "amazing-grace" -> "amazing grace".
    pub spaced: String,
    /// Words of `spaced`.
    pub words: Vec<String>,
}

impl NormalizedQuery {
    #[must_use]
    pub fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let joined = normalize(&lower).split_whitespace().collect::<Vec<_>>().join(" ");
        let words: Vec<String> = lower
            .split(|c: char| c.is_whitespace() || PUNCTUATION.contains(&c))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        let spaced = words.join(" ");
        Self {
            joined,
            spaced,
            words,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Percentage (0-100) of query words found as substrings of `field`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn overlap_percent(&self, field: &str) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let matched = self.words.iter().filter(|w| field.contains(w.as_str())).count();
        matched as f64 / self.words.len() as f64 * 100.0
    }

    /// Match against an already-normalized field.
    ///
    /// Containment passes immediately; otherwise the word overlap must reach
    /// `threshold`. An empty field never matches. A query with no words has
    /// 0% overlap, so it only matches at threshold 0.
    #[must_use]
    pub fn matches(&self, field: &str, threshold: u8) -> bool {
        if field.is_empty() {
            return false;
        }
        if !self.is_empty() && (field.contains(&self.spaced) || field.contains(&self.joined)) {
            return true;
        }
        self.overlap_percent(field) >= f64::from(threshold)
    }
}

/// Fuzzy-match raw `query` against raw `text`.
#[must_use]
pub fn fuzzy_match(query: &str, text: &str, threshold: u8) -> bool {
    NormalizedQuery::new(query).matches(&normalize(text), threshold)
}

/// Normalized searchable text of one record.
struct SearchableFields {
    title: String,
    lyrics: String,
    first_line: String,
}

impl SearchableFields {
    fn of(hymn: &HymnRecord) -> Self {
        Self {
            title: normalize(&hymn.title),
            lyrics: normalize(&hymn.lyrics),
            first_line: normalize(&hymn.first_line),
        }
    }
}

fn number_matches(hymn: &HymnRecord, query: Option<&HymnNumber>) -> bool {
    match (query, hymn.number()) {
        (Some(query), Some(number)) => number.satisfies(query),
        _ => false,
    }
}

fn text_matches(
    hymn: &HymnRecord,
    query: &NormalizedQuery,
    number: Option<&HymnNumber>,
    options: &SearchOptions,
) -> bool {
    let threshold = options.fuzzy_threshold;
    match options.search_type {
        SearchType::Number => number_matches(hymn, number),
        SearchType::Title => query.matches(&normalize(&hymn.title), threshold),
        SearchType::FirstLine => query.matches(&normalize(&hymn.first_line), threshold),
        SearchType::Lyrics => query.matches(&normalize(&hymn.lyrics), threshold),
        SearchType::All => {
            let fields = SearchableFields::of(hymn);
            query.matches(&fields.title, threshold)
                || query.matches(&fields.lyrics, threshold)
                || query.matches(&fields.first_line, threshold)
                || number_matches(hymn, number)
        }
    }
}

/// Filter `hymns` by `query` and `options`, keeping input order.
///
/// With an empty query and no author/category filter every hymn is
/// returned.
#[must_use]
pub fn filter_hymns<'a>(
    hymns: &'a [HymnRecord],
    query: &str,
    options: &SearchOptions,
) -> Vec<&'a HymnRecord> {
    let query = query.trim();
    if query.is_empty() && options.author_filter().is_none() && options.category_filter().is_none()
    {
        return hymns.iter().collect();
    }

    let number = HymnNumber::parse_query(query);
    let normalized = NormalizedQuery::new(query);
    debug!(
        target: "hymnal::search",
        query,
        number = ?number,
        search_type = %options.search_type,
        threshold = options.fuzzy_threshold,
        "filtering hymns"
    );

    hymns
        .iter()
        .filter(|hymn| passes_filters(hymn, options))
        .filter(|hymn| {
            query.is_empty() || text_matches(hymn, &normalized, number.as_ref(), options)
        })
        .collect()
}
