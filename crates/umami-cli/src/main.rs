//! Umami CLI - ingredient co-occurrence graphs and recommendations.
//!
//! Parses arguments, installs logging and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use umami_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let ctx = commands::RunContext {
        config_path: args.config.as_deref(),
        quiet: args.quiet,
    };
    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, &ctx),
        cli::Command::Recommend(recommend_args) => {
            commands::recommend_execute(recommend_args, &ctx)
        }
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args, &ctx),
        cli::Command::Cache(cache_args) => commands::cache_execute(cache_args, &ctx),
        cli::Command::Check(check_args) => commands::check_execute(check_args, &ctx),
    };

    // Render CLI errors as miette diagnostics
    result.map_err(error::cli_error_to_miette)
}
