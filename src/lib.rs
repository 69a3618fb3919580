//! hymnal - hymn library, search and CLI
//!
//! Hymns are JSON documents in a directory. The [`search`] module matches
//! them by hymn number, title, first line or lyrics; [`storage`] keeps the
//! recently viewed and favorite lists.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hymns;
pub mod search;
pub mod storage;
pub mod test_utils;
pub mod utils;

pub use error::{HymnalError, Result};
pub use hymns::{HymnRecord, Hymnal};
pub use search::{SearchMode, SearchOptions, SearchType, filter_hymns, search};
