//! Search results formatter
//!
//! Renders search results as a numbered plain list (Human mode) or as a
//! JSON response (Json mode).

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use crate::cli::output::{Formattable, OutputFormat, RobotResponse, robot_ok, to_json};
use crate::hymns::HymnRecord;
use crate::search::{SearchMode, SearchOutcome, SearchType};
use crate::utils::format::{format_score, truncate_string};

const SNIPPET_WIDTH: usize = 60;

/// Search result item with score
#[derive(Debug, Clone)]
pub struct SearchResultItem {
    pub hymn: HymnRecord,
    /// Ranked score, lower is better; matcher results have none
    pub score: Option<f64>,
    pub snippet: Option<String>,
}

/// Search results collection for formatted display
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub mode: SearchMode,
    pub search_type: SearchType,
    pub results: Vec<SearchResultItem>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
struct SearchResultJson {
    id: String,
    hymn_number: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    first_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

/// `data` payload of a robot search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponseJson {
    query: String,
    mode: SearchMode,
    search_type: SearchType,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    results: Vec<SearchResultJson>,
}

impl SearchResults {
    pub fn new(query: impl Into<String>, mode: SearchMode, search_type: SearchType) -> Self {
        Self {
            query: query.into(),
            mode,
            search_type,
            results: Vec::new(),
            duration_ms: None,
        }
    }

    /// Collect an outcome, keeping at most `limit` hits.
    #[must_use]
    pub fn from_outcome(
        query: &str,
        search_type: SearchType,
        outcome: &SearchOutcome<'_>,
        limit: usize,
    ) -> Self {
        let mut results = Self::new(query, outcome.mode, search_type);
        for hit in outcome.hits.iter().take(limit) {
            results.add_result(hit.hymn.clone(), hit.score);
        }
        results
    }

    pub fn add_result(&mut self, hymn: HymnRecord, score: Option<f64>) {
        let snippet = Some(hymn.first_line.clone()).filter(|line| !line.is_empty() && *line != hymn.title);
        self.results.push(SearchResultItem { hymn, score, snippet });
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// The results wrapped in the robot envelope.
    #[must_use]
    pub fn to_robot(&self) -> RobotResponse<SearchResponseJson> {
        robot_ok(self.to_json_response())
    }

    fn to_json_response(&self) -> SearchResponseJson {
        SearchResponseJson {
            query: self.query.clone(),
            mode: self.mode,
            search_type: self.search_type,
            count: self.results.len(),
            duration_ms: self.duration_ms,
            results: self
                .results
                .iter()
                .map(|r| SearchResultJson {
                    id: r.hymn.id.clone(),
                    hymn_number: r.hymn.hymn_number.clone(),
                    title: r.hymn.title.clone(),
                    author: r.hymn.author_name().map(str::to_string),
                    category: r.hymn.category.clone(),
                    first_line: r.hymn.first_line.clone(),
                    score: r.score,
                })
                .collect(),
        }
    }

    fn format_human(&self) -> String {
        debug!(target: "hymnal::search", stage = "render_start", results = self.results.len());
        if self.results.is_empty() {
            return self.format_empty_results();
        }

        let mut out = self.build_metadata_header();
        out.push_str("\n\n");
        for (i, result) in self.results.iter().enumerate() {
            let _ = write!(out, "{}. {}", i + 1, result.hymn.label());
            if let Some(score) = result.score {
                let _ = write!(out, " [{}]", format_score(score));
            }
            if let Some(author) = result.hymn.author_name() {
                let _ = write!(out, " - {author}");
            }
            out.push('\n');
            if let Some(ref snippet) = result.snippet {
                let _ = writeln!(out, "   {}", truncate_string(snippet, SNIPPET_WIDTH));
            }
        }
        out
    }

    fn format_empty_results(&self) -> String {
        format!(
            "! No hymns found for '{}'\n\nTry:\n  - Different or fewer words\n  - A lower --threshold\n  - Removing --author/--category filters\n",
            self.query
        )
    }

    fn build_metadata_header(&self) -> String {
        let mut header = format!(
            "{} results for '{}' ({} search, {})",
            self.results.len(),
            self.query,
            self.search_type,
            self.mode,
        );
        if let Some(ms) = self.duration_ms {
            let _ = write!(header, " in {ms}ms");
        }
        header
    }
}

impl Formattable for SearchResults {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => to_json(&self.to_robot()).unwrap_or_default(),
        }
    }
}
