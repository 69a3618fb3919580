//! hymnal recent - Recently viewed hymns

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::list::{HymnEntry, print_table};
use crate::cli::output::{OutputFormat, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RecentArgs {
    #[command(subcommand)]
    pub command: Option<RecentCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentCommand {
    /// List recently viewed hymns, most recent first
    List,

    /// Forget all recently viewed hymns
    Clear,
}

pub fn run(ctx: &AppContext, args: &RecentArgs) -> Result<()> {
    match args.command.unwrap_or(RecentCommand::List) {
        RecentCommand::List => list_recent(ctx),
        RecentCommand::Clear => clear_recent(ctx),
    }
}

fn list_recent(ctx: &AppContext) -> Result<()> {
    let recent = ctx.library()?.recent()?;

    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(robot_ok(serde_json::json!({
            "count": recent.len(),
            "recent": recent.iter().map(HymnEntry::from).collect::<Vec<_>>(),
        }))),
        OutputFormat::Human => {
            if recent.is_empty() {
                println!("{}", "No recently viewed hymns".dimmed());
            } else {
                let rows: Vec<_> = recent.iter().collect();
                print_table(&rows);
            }
            Ok(())
        }
    }
}

fn clear_recent(ctx: &AppContext) -> Result<()> {
    ctx.library()?.clear_recent()?;

    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(robot_ok(serde_json::json!({ "cleared": true }))),
        OutputFormat::Human => {
            println!("{} Cleared recently viewed hymns", "✓".green().bold());
            Ok(())
        }
    }
}
