//! Build command implementation.
//!
//! Builds the co-occurrence graph for the configured corpus, or loads it
//! from the cache, and prints its statistics.

use crate::cli::BuildArgs;
use crate::commands::{RunContext, utils};
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;
use umami_graph::SnapshotOrigin;

/// Execute the build command.
///
/// # Steps
///
/// 1. Merge configuration with the CLI overrides
/// 2. Run the cached graph pipeline (`--force` skips cache reads)
/// 3. Print the graph summary to stdout
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing or short recipe
/// source, and unusable cache entries.
pub fn execute(args: BuildArgs, ctx: &RunContext<'_>) -> Result<()> {
    let config = utils::load_config(ctx, &ConfigOverrides::from(&args))?;

    if !ctx.quiet {
        ui::info(&format!(
            "Building graph from {} recipes of {}",
            ui::format_count(config.corpus_size as u64),
            config.source.display()
        ));
    }

    let loaded = utils::load_graph(&config, ctx)?;
    let output = &loaded.output;

    if !ctx.quiet {
        if output.report.ingredients_dropped > 0 {
            ui::warning(&format!(
                "{} ingredient lines could not be canonicalized and were dropped",
                ui::format_count(output.report.ingredients_dropped as u64)
            ));
        }
        match output.origin {
            SnapshotOrigin::GraphCache => ui::success("Graph loaded from cache"),
            SnapshotOrigin::RecipeCache => ui::success("Graph rebuilt from cached recipes"),
            SnapshotOrigin::Source => ui::success("Graph built and cached"),
        }
    }

    ui::print_graph_summary(output, loaded.elapsed);
    Ok(())
}
