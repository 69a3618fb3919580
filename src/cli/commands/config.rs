//! hymnal config - Show the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, robot_ok};
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print flat `section.key = value` lines instead of TOML
    #[arg(long)]
    pub list: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let warning = missing_hymns_dir(ctx);
    match ctx.output_format {
        OutputFormat::Json => {
            let mut response = robot_ok(serde_json::json!({
                "root": ctx.root.display().to_string(),
                "config_path": ctx.config_path.display().to_string(),
                "hymns_dir": ctx.loader.hymns_dir().display().to_string(),
                "store_path": ctx.store_path().display().to_string(),
                "config": ctx.config,
            }));
            if let Some(warning) = warning {
                response = response.with_warning(warning);
            }
            ctx.emit_robot(response)
        }
        OutputFormat::Human if args.list => {
            for line in flatten(&ctx.config) {
                println!("{line}");
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("hymnal configuration")
                .kv("Root", &ctx.root.display().to_string())
                .kv("Config", &ctx.config_path.display().to_string())
                .kv("Hymns", &ctx.loader.hymns_dir().display().to_string())
                .blank();
            if let Some(warning) = warning {
                layout.section("Warnings").bullet(&warning).blank();
            }
            layout.push_line(ctx.config.to_toml_string()?);
            emit_human(layout);
            Ok(())
        }
    }
}

fn missing_hymns_dir(ctx: &AppContext) -> Option<String> {
    let dir = ctx.loader.hymns_dir();
    (!dir.is_dir()).then(|| format!("hymns directory {} does not exist", dir.display()))
}

fn flatten(config: &Config) -> Vec<String> {
    vec![
        format!("library.hymns_dir = {}", config.library.hymns_dir.display()),
        format!("library.recent_limit = {}", config.library.recent_limit),
        format!("library.store_file = {}", config.library.store_file.display()),
        format!("search.default_threshold = {}", config.search.default_threshold),
        format!("search.default_type = {}", config.search.default_type),
        format!("search.ranked = {}", config.search.ranked),
        format!("robot.format = {}", config.robot.format),
        format!("robot.include_metadata = {}", config.robot.include_metadata),
    ]
}
