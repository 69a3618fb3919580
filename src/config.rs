use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HymnalError, Result};
use crate::search::{DEFAULT_THRESHOLD, SearchOptions, SearchType};
use crate::storage::library::DEFAULT_RECENT_LIMIT;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Defaults, then either the explicit file or the global and project
    /// files, then `HYMNAL_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("HYMNAL_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                HymnalError::MissingConfig(format!("config file {} does not exist", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML document over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| HymnalError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| HymnalError::Config(format!("serialize config: {err}")))
    }

    /// Search options seeded from `[search]`.
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
            .with_type(self.search.default_type)
            .with_threshold(self.search.default_threshold)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("hymnal/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| HymnalError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| HymnalError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.library {
            self.library.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("HYMNAL_ROBOT_FORMAT") {
            self.robot.format = value;
        }
        if let Some(value) = lookup("HYMNAL_ROBOT_METADATA") {
            self.robot.include_metadata = parse_bool(&value);
        }

        if let Some(value) = lookup("HYMNAL_HYMNS_DIR") {
            self.library.hymns_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("HYMNAL_RECENT_LIMIT") {
            self.library.recent_limit = parse_number("HYMNAL_RECENT_LIMIT", &value)?;
        }

        if let Some(value) = lookup("HYMNAL_SEARCH_THRESHOLD") {
            self.search.default_threshold = parse_number("HYMNAL_SEARCH_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("HYMNAL_SEARCH_TYPE") {
            self.search.default_type = value
                .parse()
                .map_err(|err| HymnalError::Config(format!("invalid HYMNAL_SEARCH_TYPE: {err}")))?;
        }
        if let Some(value) = lookup("HYMNAL_SEARCH_RANKED") {
            self.search.ranked = parse_bool(&value);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.search.default_threshold > 100 {
            return Err(HymnalError::Config(format!(
                "search.default_threshold must be between 0 and 100, got {}",
                self.search.default_threshold
            )));
        }
        if !ROBOT_FORMATS.contains(&self.robot.format.as_str()) {
            return Err(HymnalError::Config(format!(
                "robot.format must be one of {}, got {}",
                ROBOT_FORMATS.join(", "),
                self.robot.format
            )));
        }
        if self.library.recent_limit == 0 {
            return Err(HymnalError::Config(
                "library.recent_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Hymn JSON directory, relative to the working directory.
    pub hymns_dir: PathBuf,
    pub recent_limit: usize,
    /// Recents/favorites store, relative to the hymnal root.
    pub store_file: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            hymns_dir: PathBuf::from("hymns"),
            recent_limit: DEFAULT_RECENT_LIMIT,
            store_file: PathBuf::from("library.json"),
        }
    }
}

impl LibraryConfig {
    fn merge(&mut self, patch: LibraryPatch) {
        if let Some(value) = patch.hymns_dir {
            self.hymns_dir = value;
        }
        if let Some(value) = patch.recent_limit {
            self.recent_limit = value;
        }
        if let Some(value) = patch.store_file {
            self.store_file = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_threshold: u8,
    pub default_type: SearchType,
    /// Pick the ranked index for free text; `false` always uses the matcher.
    pub ranked: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            default_type: SearchType::All,
            ranked: true,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_threshold {
            self.default_threshold = value;
        }
        if let Some(value) = patch.default_type {
            self.default_type = value;
        }
        if let Some(value) = patch.ranked {
            self.ranked = value;
        }
    }
}

/// `json` is pretty-printed, `compact` is one line per response.
pub const ROBOT_FORMATS: &[&str] = &["json", "compact"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub format: String,
    /// Include `timestamp` and `version` in robot responses.
    pub include_metadata: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            include_metadata: true,
        }
    }
}

impl RobotConfig {
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.format == "compact"
    }

    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.include_metadata {
            self.include_metadata = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub library: Option<LibraryPatch>,
    pub search: Option<SearchPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LibraryPatch {
    pub hymns_dir: Option<PathBuf>,
    pub recent_limit: Option<usize>,
    pub store_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_threshold: Option<u8>,
    pub default_type: Option<SearchType>,
    pub ranked: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
    pub include_metadata: Option<bool>,
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_number<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| HymnalError::Config(format!("invalid {key} value {value}: {err}")))
}
