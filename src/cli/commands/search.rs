//! hymnal search - Search hymns

use std::time::Instant;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::{Formattable, OutputFormat};
use crate::error::Result;
use crate::search::{SearchMode, SearchOptions, SearchType, search_in_mode};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Hymn number, or words from the title, first line or lyrics
    #[arg(default_value = "")]
    pub query: String,

    /// Only hymns whose author contains this text
    #[arg(long, short)]
    pub author: Option<String>,

    /// Only hymns whose category contains this text
    #[arg(long, short)]
    pub category: Option<String>,

    /// Field to search: all, title, lyrics, first_line, number
    #[arg(long = "type", short = 't')]
    pub search_type: Option<SearchType>,

    /// Match threshold / sensitivity, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Maximum number of results
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: usize,

    /// Always use the token-overlap matcher
    #[arg(long)]
    pub manual: bool,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let hymnal = ctx.hymnal()?;
    let options = build_options(ctx.config.search_options(), args);
    let mode = select_mode(ctx.config.search.ranked, args, &options);
    debug!(target: "hymnal::search", mode = %mode, query = %args.query, "running search");

    let start = Instant::now();
    let outcome = search_in_mode(hymnal.as_slice(), &args.query, &options, mode);
    let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(target: "hymnal::search", hits = outcome.len(), duration_ms = elapsed, "search complete");

    let results =
        SearchResults::from_outcome(&args.query, options.search_type, &outcome, args.limit)
            .with_duration(elapsed);
    match ctx.output_format {
        OutputFormat::Json => ctx.emit_robot(results.to_robot()),
        OutputFormat::Human => {
            println!("{}", results.format(OutputFormat::Human));
            Ok(())
        }
    }
}

fn build_options(defaults: SearchOptions, args: &SearchArgs) -> SearchOptions {
    let mut options = defaults;
    if let Some(author) = &args.author {
        options = options.with_author(author.clone());
    }
    if let Some(category) = &args.category {
        options = options.with_category(category.clone());
    }
    if let Some(search_type) = args.search_type {
        options = options.with_type(search_type);
    }
    if let Some(threshold) = args.threshold {
        options = options.with_threshold(threshold);
    }
    options
}

fn select_mode(ranked_enabled: bool, args: &SearchArgs, options: &SearchOptions) -> SearchMode {
    if args.manual || !ranked_enabled {
        SearchMode::Matcher
    } else {
        SearchMode::select(&args.query, options)
    }
}
