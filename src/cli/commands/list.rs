//! hymnal list - List hymns in number order

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, robot_ok};
use crate::error::Result;
use crate::hymns::HymnRecord;
use crate::utils::format::truncate_string;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of hymns to show
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let page: Vec<&HymnRecord> = hymnal.iter().skip(args.offset).take(args.limit).collect();
    debug!(target: "hymnal::list", total = hymnal.len(), shown = page.len(), "listing hymns");

    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(robot_ok(serde_json::json!({
            "count": page.len(),
            "total": hymnal.len(),
            "hymns": page.iter().map(|h| HymnEntry::from(*h)).collect::<Vec<_>>(),
        }))),
        OutputFormat::Human => {
            if page.is_empty() {
                println!("No hymns found");
                println!();
                println!("Add hymn JSON files to: {}", ctx.loader.hymns_dir().display());
                return Ok(());
            }
            print_table(&page);
            println!();
            println!(
                "Total: {} hymns (showing {}, offset: {})",
                hymnal.len(),
                page.len(),
                args.offset
            );
            Ok(())
        }
    }
}

/// Serializable hymn summary shared by the listing commands
#[derive(Debug, Clone, Serialize)]
pub struct HymnEntry {
    pub id: String,
    pub hymn_number: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub first_line: String,
}

impl From<&HymnRecord> for HymnEntry {
    fn from(h: &HymnRecord) -> Self {
        Self {
            id: h.id.clone(),
            hymn_number: h.hymn_number.clone(),
            title: h.title.clone(),
            author: h.author_name().map(str::to_string),
            category: h.category.clone(),
            first_line: h.first_line.clone(),
        }
    }
}

/// Print `NUMBER  TITLE  AUTHOR` rows.
pub fn print_table(hymns: &[&HymnRecord]) {
    println!("{:8} {:40} {:24}", "NUMBER", "TITLE", "AUTHOR");
    println!("{}", "─".repeat(74));
    for hymn in hymns {
        println!("{}", table_row(hymn));
    }
}

fn table_row(hymn: &HymnRecord) -> String {
    format!(
        "{:8} {:40} {:24}",
        hymn.hymn_number,
        truncate_string(&hymn.title, 40),
        truncate_string(hymn.author_name().unwrap_or("-"), 24)
    )
    .trim_end()
    .to_string()
}
