//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod config;
pub mod edit;
pub mod favorite;
pub mod list;
pub mod recent;
pub mod search;
pub mod show;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search hymns by number, title, first line or lyrics
    Search(search::SearchArgs),

    /// List hymns in number order
    List(list::ListArgs),

    /// Show a hymn's lyrics
    Show(show::ShowArgs),

    /// Replace a hymn's lyrics
    Edit(edit::EditArgs),

    /// Manage favorite hymns
    Favorite(favorite::FavoriteArgs),

    /// Recently viewed hymns
    Recent(recent::RecentArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Edit(args) => edit::run(ctx, args),
        Commands::Favorite(args) => favorite::run(ctx, args),
        Commands::Recent(args) => recent::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}
