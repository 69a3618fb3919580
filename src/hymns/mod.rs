//! Hymn records and the in-memory hymnal.

pub mod loader;
pub mod lyrics;
pub mod number;

use serde::{Deserialize, Serialize};

pub use loader::HymnLoader;
pub use lyrics::{ParsedLyrics, first_line, parse_lyrics};
pub use number::HymnNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single hymn as loaded from disk.
///
/// `first_line`, `verses` and `chorus` are derived from `lyrics` by the
/// loader; search treats the whole record as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HymnRecord {
    pub id: String,
    pub hymn_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub lyrics: String,
    #[serde(default)]
    pub first_line: String,
    #[serde(default)]
    pub verses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl HymnRecord {
    /// Build a record, deriving the first line, verses and chorus from the
    /// lyrics.
    pub fn new(
        id: impl Into<String>,
        hymn_number: impl Into<String>,
        title: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        let mut record = Self {
            id: id.into(),
            hymn_number: hymn_number.into(),
            title: title.into(),
            author: None,
            category: None,
            lyrics: String::new(),
            first_line: String::new(),
            verses: Vec::new(),
            chorus: None,
            file_name: None,
        };
        record.set_lyrics(lyrics);
        record
    }

    #[must_use]
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author = Some(Author::new(name));
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Replace the lyrics and recompute every field derived from them.
    pub fn set_lyrics(&mut self, lyrics: impl Into<String>) {
        self.lyrics = lyrics.into();
        self.first_line = first_line(&self.lyrics);
        let ParsedLyrics { verses, chorus } = parse_lyrics(&self.lyrics);
        self.verses = verses;
        self.chorus = chorus;
    }

    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.name.as_str())
    }

    #[must_use]
    pub fn number(&self) -> Option<HymnNumber> {
        HymnNumber::parse(&self.hymn_number)
    }

    /// "355a: Title" label used in listings.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.hymn_number, self.title)
    }
}

/// The loaded hymn collection, kept in hymn-number order.
#[derive(Debug, Clone, Default)]
pub struct Hymnal {
    hymns: Vec<HymnRecord>,
}

impl Hymnal {
    #[must_use]
    pub const fn new(hymns: Vec<HymnRecord>) -> Self {
        Self { hymns }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[HymnRecord] {
        &self.hymns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hymns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hymns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HymnRecord> {
        self.hymns.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HymnRecord> {
        self.hymns.iter().find(|h| h.id == id)
    }

    /// Resolve user input as an id first, then as a hymn number.
    #[must_use]
    pub fn find(&self, id_or_number: &str) -> Option<&HymnRecord> {
        let needle = id_or_number.trim();
        self.get(needle).or_else(|| {
            self.hymns
                .iter()
                .find(|h| h.hymn_number.eq_ignore_ascii_case(needle))
        })
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.hymns.iter().position(|h| h.id == id)
    }

    /// The hymns immediately before and after `id` in collection order.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> (Option<&HymnRecord>, Option<&HymnRecord>) {
        let Some(index) = self.position(id) else {
            return (None, None);
        };
        let previous = index.checked_sub(1).and_then(|i| self.hymns.get(i));
        let next = self.hymns.get(index + 1);
        (previous, next)
    }
}
