//! Error types for hymnal

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HymnalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("hymn not found: {0}")]
    HymnNotFound(String),

    #[error("invalid hymn data: {0}")]
    InvalidHymn(String),

    #[error("hymns directory not found at {0}")]
    HymnsDirMissing(String),

    #[error("store error: {0}")]
    Store(String),
}

impl HymnalError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::HymnNotFound(_) => "not_found",
            Self::InvalidHymn(_) => "invalid_hymn",
            Self::HymnsDirMissing(_) => "hymns_dir_missing",
            Self::Store(_) => "store",
        }
    }
}

pub type Result<T> = std::result::Result<T, HymnalError>;
