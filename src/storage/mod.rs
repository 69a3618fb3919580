//! Storage layer for hymnal
//!
//! Small string key/value stores. The hymn library keeps recents and
//! favorites in one of these; the hymn documents themselves live in the
//! hymns directory (see [`crate::hymns::loader`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{HymnalError, Result};
use crate::utils::fs::{read_optional, write_atomic};

pub mod library;

pub use library::Library;

/// String-keyed store for small JSON payloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// JSON FILE STORE
// =============================================================================

/// All keys in one JSON object file. Every write rewrites the file through
/// a temp file in the same directory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable object is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if let Some(content) = read_optional(&path)? {
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        target: "hymnal::storage",
                        path = %path.display(),
                        error = %err,
                        "store file is corrupt, starting empty"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        debug!(target: "hymnal::storage", path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, payload.as_bytes()).map_err(|err| {
            HymnalError::Store(format!("failed to write {}: {err}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
