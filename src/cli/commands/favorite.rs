//! hymnal favorite - Manage favorite hymns
//!
//! `hymnal favorite <hymn>` toggles; `add` and `remove` are explicit.

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::list::{HymnEntry, print_table};
use crate::cli::output::robot_ok;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct FavoriteArgs {
    #[command(subcommand)]
    pub command: Option<FavoriteCommand>,

    /// Hymn id or number to toggle
    pub hymn: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommand {
    /// Add a hymn to favorites
    Add {
        /// Hymn id or number
        hymn: String,
    },

    /// Remove a hymn from favorites
    Remove {
        /// Hymn id or number
        hymn: String,
    },

    /// List all favorite hymns
    List {
        /// Maximum number of favorites to show
        #[arg(long, short = 'n', default_value = "50")]
        limit: usize,

        /// Offset for pagination
        #[arg(long, default_value = "0")]
        offset: usize,
    },
}

pub fn run(ctx: &AppContext, args: &FavoriteArgs) -> Result<()> {
    if let Some(ref hymn) = args.hymn {
        if args.command.is_none() {
            return toggle_favorite(ctx, hymn);
        }
    }

    match &args.command {
        Some(FavoriteCommand::Add { hymn }) => add_favorite(ctx, hymn),
        Some(FavoriteCommand::Remove { hymn }) => remove_favorite(ctx, hymn),
        Some(FavoriteCommand::List { limit, offset }) => list_favorites(ctx, *limit, *offset),
        None => list_favorites(ctx, 50, 0),
    }
}

fn toggle_favorite(ctx: &AppContext, input: &str) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let hymn = ctx.resolve(&hymnal, input)?;
    let mut library = ctx.library()?;
    let favorite = library.toggle_favorite(hymn)?;

    if ctx.robot_mode() {
        ctx.emit_robot(robot_ok(serde_json::json!({
            "hymn_id": hymn.id,
            "favorite": favorite,
        })))
    } else {
        if favorite {
            println!("{} Added '{}' to favorites", "✓".green().bold(), hymn.label().cyan());
        } else {
            println!("{} Removed '{}' from favorites", "✓".green().bold(), hymn.label().cyan());
        }
        Ok(())
    }
}

fn add_favorite(ctx: &AppContext, input: &str) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let hymn = ctx.resolve(&hymnal, input)?;
    let mut library = ctx.library()?;
    let added = library.add_favorite(hymn)?;

    if ctx.robot_mode() {
        ctx.emit_robot(robot_ok(serde_json::json!({
            "hymn_id": hymn.id,
            "added": added,
            "favorite": true,
        })))
    } else {
        if added {
            println!("{} Added '{}' to favorites", "✓".green().bold(), hymn.label().cyan());
        } else {
            println!("{} '{}' is already a favorite", "!".yellow(), hymn.label().cyan());
        }
        Ok(())
    }
}

fn remove_favorite(ctx: &AppContext, input: &str) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    // A favorite may outlive its file; fall back to the raw input as the id.
    let hymn_id = hymnal
        .find(input)
        .map_or_else(|| input.to_string(), |h| h.id.clone());
    let mut library = ctx.library()?;
    let removed = library.remove_favorite(&hymn_id)?;

    if ctx.robot_mode() {
        ctx.emit_robot(robot_ok(serde_json::json!({
            "hymn_id": hymn_id,
            "removed": removed,
            "favorite": false,
        })))
    } else {
        if removed {
            println!("{} Removed '{}' from favorites", "✓".green().bold(), hymn_id.cyan());
        } else {
            println!("{} '{}' was not in favorites", "!".yellow(), hymn_id.cyan());
        }
        Ok(())
    }
}

fn list_favorites(ctx: &AppContext, limit: usize, offset: usize) -> Result<()> {
    let favorites = ctx.library()?.favorites()?;
    let page: Vec<_> = favorites.iter().skip(offset).take(limit).collect();

    if ctx.robot_mode() {
        return ctx.emit_robot(robot_ok(serde_json::json!({
            "count": page.len(),
            "favorites": page.iter().map(|h| HymnEntry::from(*h)).collect::<Vec<_>>(),
        })));
    }

    if page.is_empty() {
        println!("{}", "No favorite hymns".dimmed());
        println!();
        println!("Add a favorite with:");
        println!("  hymnal favorite <hymn>");
    } else {
        println!("{} favorite hymns:", favorites.len().to_string().bold());
        println!();
        print_table(&page);
    }
    Ok(())
}
