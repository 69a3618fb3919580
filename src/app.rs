use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::cli::output::{self, RobotResponse};
use crate::config::Config;
use crate::error::{HymnalError, Result};
use crate::hymns::{HymnLoader, HymnRecord, Hymnal};
use crate::storage::{JsonFileStore, Library};

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub loader: HymnLoader,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var_os("HYMNAL_CONFIG").map(PathBuf::from))
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;

        let hymns_dir = cli
            .hymns_dir
            .clone()
            .unwrap_or_else(|| config.library.hymns_dir.clone());
        debug!(
            target: "hymnal::app",
            root = %root.display(),
            hymns_dir = %hymns_dir.display(),
            "context ready"
        );

        Ok(Self {
            root,
            config_path,
            output_format: cli.output_format(),
            config,
            loader: HymnLoader::new(hymns_dir),
            verbosity: cli.verbose,
        })
    }

    #[must_use]
    pub fn robot_mode(&self) -> bool {
        self.output_format == OutputFormat::Json
    }

    /// Print a robot response with the configured `[robot]` shape.
    pub fn emit_robot<T: Serialize>(&self, response: RobotResponse<T>) -> Result<()> {
        output::emit_robot(response, &self.config.robot)
    }

    /// Load the hymn collection from the hymns directory.
    pub fn hymnal(&self) -> Result<Hymnal> {
        self.loader.load_hymnal()
    }

    /// Resolve an id or hymn number against a loaded hymnal.
    pub fn resolve<'a>(&self, hymnal: &'a Hymnal, id_or_number: &str) -> Result<&'a HymnRecord> {
        hymnal
            .find(id_or_number)
            .ok_or_else(|| HymnalError::HymnNotFound(id_or_number.to_string()))
    }

    /// Recents and favorites backed by the store file under the root.
    pub fn library(&self) -> Result<Library<JsonFileStore>> {
        let store = JsonFileStore::open(self.store_path())?;
        Ok(Library::new(store).with_recent_limit(self.config.library.recent_limit))
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.root.join(&self.config.library.store_file)
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("HYMNAL_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".hymnal") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| HymnalError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("hymnal"))
    }
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".hymnal") {
        root.join("config.toml")
    } else {
        dirs::config_dir()
            .unwrap_or_else(|| root.to_path_buf())
            .join("hymnal/config.toml")
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
