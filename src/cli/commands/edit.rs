//! hymnal edit - Replace a hymn's lyrics

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, robot_ok};
use crate::error::{HymnalError, Result};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Hymn id or number to edit
    pub hymn: String,

    /// New lyrics text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub lyrics: Option<String>,

    /// Read the new lyrics from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &EditArgs) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let mut record = ctx.resolve(&hymnal, &args.hymn)?.clone();

    let lyrics = read_lyrics(args)?;
    record.set_lyrics(lyrics);
    let path = ctx.loader.save_lyrics(&record)?;
    info!(target: "hymnal::edit", id = %record.id, path = %path.display(), "lyrics updated");

    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(robot_ok(serde_json::json!({
            "id": record.id,
            "path": path.display().to_string(),
            "verses": record.verses.len(),
            "has_chorus": record.chorus.is_some(),
        }))),
        OutputFormat::Human => {
            println!(
                "{} Saved lyrics for '{}' to {}",
                "✓".green().bold(),
                record.label().cyan(),
                path.display()
            );
            Ok(())
        }
    }
}

fn read_lyrics(args: &EditArgs) -> Result<String> {
    match (&args.lyrics, &args.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|err| {
            HymnalError::InvalidHymn(format!("cannot read lyrics from {}: {err}", path.display()))
        }),
        (None, None) => Err(HymnalError::InvalidHymn("no lyrics given".to_string())),
    }
}
