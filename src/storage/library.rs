//! Recently viewed and favorite hymns.

use tracing::{debug, warn};

use crate::error::Result;
use crate::hymns::HymnRecord;
use crate::storage::KeyValueStore;

pub const RECENT_KEY: &str = "recentHymns";
pub const FAVORITES_KEY: &str = "favorites";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Recents and favorites kept as JSON arrays of hymn records in a
/// [`KeyValueStore`].
pub struct Library<S: KeyValueStore> {
    store: S,
    recent_limit: usize,
}

impl<S: KeyValueStore> Library<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    #[must_use]
    pub const fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Most recent first.
    pub fn recent(&self) -> Result<Vec<HymnRecord>> {
        self.read_list(RECENT_KEY)
    }

    /// Move `hymn` to the front of the recents, dropping the oldest past
    /// the limit.
    pub fn add_to_recent(&mut self, hymn: &HymnRecord) -> Result<Vec<HymnRecord>> {
        let mut recent = self.recent()?;
        recent.retain(|h| h.id != hymn.id);
        recent.insert(0, hymn.clone());
        recent.truncate(self.recent_limit);
        self.write_list(RECENT_KEY, &recent)?;
        debug!(target: "hymnal::library", id = %hymn.id, count = recent.len(), "recorded recent hymn");
        Ok(recent)
    }

    pub fn clear_recent(&mut self) -> Result<()> {
        self.store.remove(RECENT_KEY)
    }

    pub fn favorites(&self) -> Result<Vec<HymnRecord>> {
        self.read_list(FAVORITES_KEY)
    }

    pub fn is_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.favorites()?.iter().any(|h| h.id == id))
    }

    /// Add or remove `hymn`; returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, hymn: &HymnRecord) -> Result<bool> {
        let mut favorites = self.favorites()?;
        let before = favorites.len();
        favorites.retain(|h| h.id != hymn.id);
        let now_favorite = favorites.len() == before;
        if now_favorite {
            favorites.push(hymn.clone());
        }
        self.write_list(FAVORITES_KEY, &favorites)?;
        debug!(target: "hymnal::library", id = %hymn.id, favorite = now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    /// Make `hymn` a favorite if it is not one already.
    pub fn add_favorite(&mut self, hymn: &HymnRecord) -> Result<bool> {
        if self.is_favorite(&hymn.id)? {
            return Ok(false);
        }
        self.toggle_favorite(hymn)
    }

    /// Drop `id` from the favorites; returns whether anything was removed.
    pub fn remove_favorite(&mut self, id: &str) -> Result<bool> {
        let mut favorites = self.favorites()?;
        let before = favorites.len();
        favorites.retain(|h| h.id != id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.write_list(FAVORITES_KEY, &favorites)?;
        Ok(true)
    }

    fn read_list(&self, key: &str) -> Result<Vec<HymnRecord>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(err) => {
                warn!(target: "hymnal::library", key, error = %err, "stored list is corrupt, ignoring");
                Ok(Vec::new())
            }
        }
    }

    fn write_list(&mut self, key: &str, list: &[HymnRecord]) -> Result<()> {
        let payload = serde_json::to_string(list)?;
        self.store.set(key, payload)
    }
}
