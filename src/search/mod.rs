//! Hymn search
//!
//! Two modes share the same options: the token-overlap [`matcher`] for
//! hymn numbers and explicit filtering, and the weighted [`ranked`] index
//! for free-text queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hymns::{HymnNumber, HymnRecord};

pub mod filters;
pub mod matcher;
pub mod ranked;

pub use filters::passes_filters;
pub use matcher::{NormalizedQuery, filter_hymns, fuzzy_match, normalize};
pub use ranked::{HymnField, RankedHit, RankedIndex, WeightedKey};

/// Default minimum word-overlap percentage.
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Which field(s) a query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    All,
    Title,
    Lyrics,
    FirstLine,
    Number,
}

impl SearchType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Title => "title",
            Self::Lyrics => "lyrics",
            Self::FirstLine => "first_line",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(Self::All),
            "title" => Ok(Self::Title),
            "lyrics" => Ok(Self::Lyrics),
            "first_line" | "firstline" => Ok(Self::FirstLine),
            "number" => Ok(Self::Number),
            other => Err(format!(
                "unknown search type '{other}' (expected all, title, lyrics, first_line or number)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub search_type: SearchType,
    /// 0-100. Word-overlap percentage for the matcher, sensitivity for the
    /// ranked index.
    pub fuzzy_threshold: u8,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            author: None,
            category: None,
            search_type: SearchType::All,
            fuzzy_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold.min(100);
        self
    }

    /// Author filter, `None` when unset or empty.
    #[must_use]
    pub fn author_filter(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }

    /// Category filter, `None` when unset or empty.
    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Token-overlap filter, input order preserved.
    Matcher,
    /// Weighted approximate match, best first.
    Ranked,
}

impl SearchMode {
    /// Number queries and number searches go to the matcher, everything
    /// else to the ranked index.
    #[must_use]
    pub fn select(query: &str, options: &SearchOptions) -> Self {
        if options.search_type == SearchType::Number || HymnNumber::is_number_query(query) {
            Self::Matcher
        } else {
            Self::Ranked
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matcher => f.write_str("matcher"),
            Self::Ranked => f.write_str("ranked"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub hymn: &'a HymnRecord,
    /// Ranked score (lower is better); absent for matcher hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub mode: SearchMode,
    pub hits: Vec<SearchHit<'a>>,
}

impl<'a> SearchOutcome<'a> {
    #[must_use]
    pub fn hymns(&self) -> Vec<&'a HymnRecord> {
        self.hits.iter().map(|hit| hit.hymn).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Search with the mode picked by [`SearchMode::select`].
#[must_use]
pub fn search<'a>(hymns: &'a [HymnRecord], query: &str, options: &SearchOptions) -> SearchOutcome<'a> {
    search_in_mode(hymns, query, options, SearchMode::select(query, options))
}

/// Search with an explicit mode.
#[must_use]
pub fn search_in_mode<'a>(
    hymns: &'a [HymnRecord],
    query: &str,
    options: &SearchOptions,
    mode: SearchMode,
) -> SearchOutcome<'a> {
    let hits = match mode {
        SearchMode::Matcher => filter_hymns(hymns, query, options)
            .into_iter()
            .map(|hymn| SearchHit { hymn, score: None })
            .collect(),
        SearchMode::Ranked => {
            RankedIndex::new(hymns, options.search_type, options.fuzzy_threshold)
                .search_filtered(query, options)
                .into_iter()
                .map(|hit| SearchHit {
                    hymn: hit.hymn,
                    score: Some(hit.score),
                })
                .collect()
        }
    };
    SearchOutcome { mode, hits }
}
