//! Flat-file hymn storage: one JSON document per hymn in a directory.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::error::{HymnalError, Result};
use crate::hymns::number::sort_key;
use crate::hymns::{Author, HymnRecord, Hymnal};
use crate::utils::fs::{read_optional, write_atomic};

static FILE_NAME_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hymn_(\d+[a-z]?)\.json").expect("file name pattern"));

const UNKNOWN_AUTHOR: &str = "Unknown";

/// On-disk shape of a hymn document. Every field is optional; the loader
/// fills in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHymn {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    hymn_number: Option<serde_json::Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<RawAuthor>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    lyrics: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAuthor {
    Named { name: String },
    Plain(String),
}

impl RawAuthor {
    fn into_name(self) -> String {
        match self {
            Self::Named { name } | Self::Plain(name) => name,
        }
    }
}

pub struct HymnLoader {
    hymns_dir: PathBuf,
}

impl HymnLoader {
    pub fn new(hymns_dir: impl Into<PathBuf>) -> Self {
        Self {
            hymns_dir: hymns_dir.into(),
        }
    }

    #[must_use]
    pub fn hymns_dir(&self) -> &Path {
        &self.hymns_dir
    }

    /// Load every `*.json` hymn in the directory, sorted by hymn number.
    ///
    /// A missing directory yields an empty list. Files that cannot be read
    /// or parsed are logged and skipped.
    pub fn load_all(&self) -> Result<Vec<HymnRecord>> {
        if !self.hymns_dir.is_dir() {
            warn!(
                target: "hymnal::loader",
                dir = %self.hymns_dir.display(),
                "hymns directory not found, starting with an empty hymnal"
            );
            return Ok(Vec::new());
        }

        let mut hymns = Vec::new();
        let walker = WalkDir::new(&self.hymns_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(target: "hymnal::loader", error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(".json") {
                continue;
            }

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(err) => {
                    error!(target: "hymnal::loader", file = %file_name, error = %err, "error reading hymn file");
                    continue;
                }
            };
            let raw: RawHymn = match serde_json::from_str(&content) {
                Ok(raw) => raw,
                Err(err) => {
                    error!(target: "hymnal::loader", file = %file_name, error = %err, "error parsing hymn file");
                    continue;
                }
            };

            let record = build_record(raw, &file_name, hymns.len());
            debug!(target: "hymnal::loader", id = %record.id, file = %file_name, "loaded hymn");
            hymns.push(record);
        }

        hymns.sort_by_key(|h| sort_key(&h.hymn_number));
        info!(target: "hymnal::loader", count = hymns.len(), "hymns loaded");
        Ok(hymns)
    }

    pub fn load_hymnal(&self) -> Result<Hymnal> {
        Ok(Hymnal::new(self.load_all()?))
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<HymnRecord>> {
        Ok(self.load_all()?.into_iter().find(|h| h.id == id))
    }

    /// Write a record's lyrics back to its source file.
    ///
    /// Every other field already in the file is kept as-is; only `lyrics`
    /// is replaced. A record without a known file name is written to
    /// `hymn_<number>.json`.
    pub fn save_lyrics(&self, record: &HymnRecord) -> Result<PathBuf> {
        if record.id.trim().is_empty() {
            return Err(HymnalError::InvalidHymn("missing id".to_string()));
        }
        if record.lyrics.trim().is_empty() {
            return Err(HymnalError::InvalidHymn(format!(
                "missing lyrics for {}",
                record.id
            )));
        }
        if !self.hymns_dir.is_dir() {
            return Err(HymnalError::HymnsDirMissing(
                self.hymns_dir.display().to_string(),
            ));
        }

        let file_name = target_file_name(record)?;
        let path = self.hymns_dir.join(&file_name);

        let mut document = if let Some(content) = read_optional(&path)? {
            match serde_json::from_str::<serde_json::Value>(&content)? {
                serde_json::Value::Object(map) => map,
                _ => {
                    return Err(HymnalError::InvalidHymn(format!(
                        "{file_name} does not contain a JSON object"
                    )));
                }
            }
        } else {
            serde_json::Map::new()
        };
        document.insert(
            "lyrics".to_string(),
            serde_json::Value::String(record.lyrics.clone()),
        );

        let payload = serde_json::to_string_pretty(&serde_json::Value::Object(document))?;
        write_atomic(&path, payload.as_bytes())?;

        info!(target: "hymnal::loader", id = %record.id, file = %file_name, "saved lyrics");
        Ok(path)
    }
}

fn build_record(raw: RawHymn, file_name: &str, position: usize) -> HymnRecord {
    let hymn_number = raw
        .hymn_number
        .as_ref()
        .map(number_to_string)
        .filter(|n| !n.is_empty())
        .or_else(|| number_from_file_name(file_name))
        .unwrap_or_default();

    let title = raw.title.unwrap_or_default();
    let id = derive_id(raw.id.as_deref(), &hymn_number, &title, position);

    let author = raw
        .author
        .map(RawAuthor::into_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let mut record = HymnRecord::new(id, hymn_number, title, raw.lyrics.unwrap_or_default())
        .with_file_name(file_name);
    record.author = Some(Author::new(author));
    record.category = raw.category.filter(|c| !c.is_empty());
    record
}

fn number_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// `hymn_355a.json` -> `355a`
fn number_from_file_name(file_name: &str) -> Option<String> {
    FILE_NAME_NUMBER
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Stable id: explicit id, then `hymn-<number>`, then the slugified title,
/// then the load position.
fn derive_id(explicit: Option<&str>, hymn_number: &str, title: &str, position: usize) -> String {
    if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    if !hymn_number.is_empty() {
        return format!("hymn-{hymn_number}");
    }
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }
    format!("hymn-{}", position + 1)
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn target_file_name(record: &HymnRecord) -> Result<String> {
    let file_name = match record.file_name.as_deref().filter(|f| !f.is_empty()) {
        Some(name) => name.to_string(),
        None if !record.hymn_number.is_empty() => format!("hymn_{}.json", record.hymn_number),
        None => {
            return Err(HymnalError::InvalidHymn(format!(
                "{} has neither a source file nor a hymn number",
                record.id
            )));
        }
    };
    if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
        return Err(HymnalError::InvalidHymn(format!(
            "refusing to write outside the hymns directory: {file_name}"
        )));
    }
    Ok(file_name)
}
