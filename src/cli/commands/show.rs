//! hymnal show - Show a hymn's lyrics
//!
//! Viewing a hymn also records it in the recently viewed list.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, robot_ok};
use crate::error::{HymnalError, Result};
use crate::hymns::{HymnRecord, Hymnal};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Hymn id or number
    pub hymn: String,

    /// Show the hymn after this one
    #[arg(long, conflicts_with = "prev")]
    pub next: bool,

    /// Show the hymn before this one
    #[arg(long)]
    pub prev: bool,

    /// Do not add the hymn to the recently viewed list
    #[arg(long)]
    pub no_record: bool,
}

#[derive(Debug, Serialize)]
struct ShowData<'a> {
    hymn: &'a HymnRecord,
    favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<&'a str>,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let anchor = ctx.resolve(&hymnal, &args.hymn)?;
    let hymn = navigate(&hymnal, anchor, args)?;
    debug!(target: "hymnal::show", id = %hymn.id, "showing hymn");

    let mut library = ctx.library()?;
    if !args.no_record {
        library.add_to_recent(hymn)?;
    }
    let favorite = library.is_favorite(&hymn.id)?;

    let (previous, next) = hymnal.neighbors(&hymn.id);
    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(robot_ok(ShowData {
            hymn,
            favorite,
            previous: previous.map(|h| h.id.as_str()),
            next: next.map(|h| h.id.as_str()),
        })),
        OutputFormat::Human => {
            emit_human(render(hymn, favorite));
            Ok(())
        }
    }
}

fn navigate<'a>(hymnal: &'a Hymnal, anchor: &'a HymnRecord, args: &ShowArgs) -> Result<&'a HymnRecord> {
    let (previous, next) = hymnal.neighbors(&anchor.id);
    if args.next {
        next.ok_or_else(|| HymnalError::HymnNotFound(format!("no hymn after {}", anchor.label())))
    } else if args.prev {
        previous
            .ok_or_else(|| HymnalError::HymnNotFound(format!("no hymn before {}", anchor.label())))
    } else {
        Ok(anchor)
    }
}

fn render(hymn: &HymnRecord, favorite: bool) -> HumanLayout {
    let mut layout = HumanLayout::new();
    let title = if favorite {
        format!("{} {}", hymn.label(), "★".yellow())
    } else {
        hymn.label()
    };
    layout.title(&title);
    if let Some(author) = hymn.author_name() {
        layout.kv("Author", author);
    }
    if let Some(category) = &hymn.category {
        layout.kv("Category", category);
    }
    layout.kv("Id", &hymn.id).blank();

    if hymn.verses.is_empty() && hymn.chorus.is_none() {
        layout.push_line(hymn.lyrics.trim());
        return layout;
    }
    for verse in &hymn.verses {
        layout.push_line(verse.as_str()).blank();
    }
    if let Some(chorus) = &hymn.chorus {
        layout.section("Chorus").push_line(chorus.as_str());
    }
    layout
}
