//! Weighted approximate-match index.
//!
//! Each searchable field gets a weight (title 0.9, first line 0.8, hymn
//! number 0.6, lyrics 0.4). A field's distance to the query is the best
//! approximate-substring edit distance divided by the query length, so a
//! match anywhere in the field counts the same. A hymn is a hit when any
//! field is within the distance threshold; hits are ranked by the weighted
//! product of their matching fields' distances.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::hymns::HymnRecord;
use crate::search::filters::passes_filters;
use crate::search::{SearchOptions, SearchType};

/// Stand-in for a zero distance so exact matches still rank by weight.
const EXACT_SCORE: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HymnField {
    Title,
    FirstLine,
    Lyrics,
    Number,
}

impl HymnField {
    #[must_use]
    pub fn value(self, hymn: &HymnRecord) -> &str {
        match self {
            Self::Title => &hymn.title,
            Self::FirstLine => &hymn.first_line,
            Self::Lyrics => &hymn.lyrics,
            Self::Number => &hymn.hymn_number,
        }
    }
}

impl fmt::Display for HymnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::FirstLine => "first_line",
            Self::Lyrics => "lyrics",
            Self::Number => "number",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedKey {
    pub field: HymnField,
    pub weight: f64,
}

impl WeightedKey {
    #[must_use]
    pub const fn new(field: HymnField, weight: f64) -> Self {
        Self { field, weight }
    }
}

/// Keys searched for a search type.
#[must_use]
pub fn keys_for(search_type: SearchType) -> Vec<WeightedKey> {
    match search_type {
        SearchType::Title => vec![WeightedKey::new(HymnField::Title, 1.0)],
        SearchType::FirstLine => vec![WeightedKey::new(HymnField::FirstLine, 1.0)],
        SearchType::Lyrics => vec![WeightedKey::new(HymnField::Lyrics, 1.0)],
        SearchType::Number => vec![WeightedKey::new(HymnField::Number, 1.0)],
        SearchType::All => vec![
            WeightedKey::new(HymnField::Title, 0.9),
            WeightedKey::new(HymnField::FirstLine, 0.8),
            WeightedKey::new(HymnField::Lyrics, 0.4),
            WeightedKey::new(HymnField::Number, 0.6),
        ],
    }
}

/// Map a 0-100 sensitivity (higher = stricter) to a 0.0-1.0 distance
/// threshold (lower = stricter).
#[must_use]
pub fn distance_threshold(sensitivity: u8) -> f64 {
    1.0 - f64::from(sensitivity.min(100)) / 100.0
}

/// Smallest edit distance between `pattern` and any substring of `text`.
#[must_use]
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // column[i] holds the distance of pattern[..i] ending at the current
    // text position; a match may start anywhere, so row 0 is always 0.
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = column[m];
    for &tc in text {
        let mut diagonal = column[0];
        column[0] = 0;
        for i in 1..=m {
            let left = column[i];
            let substitution = diagonal + usize::from(pattern[i - 1] != tc);
            column[i] = substitution.min(left + 1).min(column[i - 1] + 1);
            diagonal = left;
        }
        best = best.min(column[m]);
    }
    best
}

/// Normalized distance in `0.0..=1.0`; an empty field is always `1.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn field_distance(pattern: &[char], field: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    if field.is_empty() {
        return 1.0;
    }
    let distance = substring_distance(pattern, field) as f64 / pattern.len() as f64;
    distance.min(1.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedHit<'a> {
    pub hymn: &'a HymnRecord,
    /// Weighted score, lower is better.
    pub score: f64,
    /// Field with the smallest distance.
    pub best_field: HymnField,
    pub best_distance: f64,
}

struct IndexedHymn<'a> {
    hymn: &'a HymnRecord,
    fields: Vec<Vec<char>>,
}

/// Lowercased field text for every hymn, ready to be searched repeatedly.
pub struct RankedIndex<'a> {
    entries: Vec<IndexedHymn<'a>>,
    keys: Vec<WeightedKey>,
    threshold: f64,
}

impl<'a> RankedIndex<'a> {
    #[must_use]
    pub fn new(hymns: &'a [HymnRecord], search_type: SearchType, sensitivity: u8) -> Self {
        Self::with_keys(hymns, keys_for(search_type), distance_threshold(sensitivity))
    }

    #[must_use]
    pub fn with_keys(hymns: &'a [HymnRecord], keys: Vec<WeightedKey>, threshold: f64) -> Self {
        let total: f64 = keys.iter().map(|k| k.weight).sum();
        let keys = if total > 0.0 {
            keys.into_iter()
                .map(|k| WeightedKey::new(k.field, k.weight / total))
                .collect()
        } else {
            keys
        };

        let entries = hymns
            .iter()
            .map(|hymn| IndexedHymn {
                hymn,
                fields: keys
                    .iter()
                    .map(|k| k.field.value(hymn).to_lowercase().chars().collect())
                    .collect(),
            })
            .collect();

        Self {
            entries,
            keys,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn keys(&self) -> &[WeightedKey] {
        &self.keys
    }

    /// Ranked hits for `query`, best first. Ties keep index order.
    ///
    /// An empty query returns every hymn in index order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<RankedHit<'a>> {
        let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return self
                .entries
                .iter()
                .map(|entry| RankedHit {
                    hymn: entry.hymn,
                    score: 1.0,
                    best_field: self.keys.first().map_or(HymnField::Title, |k| k.field),
                    best_distance: 0.0,
                })
                .collect();
        }

        let mut hits: Vec<RankedHit<'a>> = self
            .entries
            .iter()
            .filter_map(|entry| self.score_entry(entry, &pattern))
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));

        debug!(
            target: "hymnal::search",
            query,
            threshold = self.threshold,
            hits = hits.len(),
            "ranked search complete"
        );
        hits
    }

    /// Ranked hits with author/category filters applied afterwards.
    #[must_use]
    pub fn search_filtered(&self, query: &str, options: &SearchOptions) -> Vec<RankedHit<'a>> {
        self.search(query)
            .into_iter()
            .filter(|hit| passes_filters(hit.hymn, options))
            .collect()
    }

    fn score_entry(&self, entry: &IndexedHymn<'a>, pattern: &[char]) -> Option<RankedHit<'a>> {
        let mut score = 1.0;
        let mut best: Option<(HymnField, f64)> = None;

        for (key, field) in self.keys.iter().zip(&entry.fields) {
            if field.is_empty() {
                continue;
            }
            let distance = field_distance(pattern, field);
            if distance > self.threshold {
                continue;
            }
            let base = if distance == 0.0 { EXACT_SCORE } else { distance };
            score *= base.powf(key.weight);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((key.field, distance));
            }
        }

        best.map(|(best_field, best_distance)| RankedHit {
            hymn: entry.hymn,
            score,
            best_field,
            best_distance,
        })
    }
}
