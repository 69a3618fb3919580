//! Command-line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

/// hymnal - browse, search and edit a hymn collection
#[derive(Parser, Debug)]
#[command(name = "hymnal", version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true, env = "HYMNAL_ROBOT")]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the global and project files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of hymn JSON files
    #[arg(long, global = true)]
    pub hymns_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}
