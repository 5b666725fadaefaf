//! Check command implementation.
//!
//! Validates the merged configuration and the recipe source without
//! building anything.

use crate::cli::CheckArgs;
use crate::commands::{RunContext, utils};
use crate::config::{ConfigOverrides, UmamiConfig};
use crate::error::{QueryError, Result};
use crate::ui;
use umami_graph::cache::CacheTable;
use umami_graph::{CacheKey, KeyStrategy};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load and validate the merged configuration
/// 2. Check that the recipe source exists (a cached graph for the size key
///    makes a missing source a warning)
/// 3. Open the cache and count its entries
///
/// The merged configuration is printed to stdout as JSON.
pub fn execute(args: CheckArgs, ctx: &RunContext<'_>) -> Result<()> {
    if !ctx.quiet {
        ui::info("Checking configuration...");
    }
    match UmamiConfig::config_file(ctx.config_path)? {
        Some(path) if !ctx.quiet => ui::info(&format!("Using {}", path.display())),
        None if !ctx.quiet => ui::info("No config file found, using defaults"),
        _ => {}
    }

    let config = utils::load_config(ctx, &ConfigOverrides::from(&args.corpus))?;
    if !ctx.quiet {
        ui::success("Configuration is valid");
    }

    let cache = utils::open_cache(&config)?;
    let cached_graphs = cache.keys(CacheTable::Graphs)?.len();

    if config.source.is_file() {
        if !ctx.quiet {
            ui::success(&format!("Recipe source {} exists", config.source.display()));
        }
    } else if config.cache_key == KeyStrategy::CorpusSize
        && cache.is_available(&CacheKey::corpus_size(config.corpus_size))?
    {
        if !ctx.quiet {
            ui::warning(&format!(
                "Recipe source {} is missing; the cached graph will be used",
                config.source.display()
            ));
        }
    } else {
        if !ctx.quiet {
            ui::error(&format!(
                "Recipe source {} not found",
                config.source.display()
            ));
        }
        return Err(QueryError::SourceNotFound(config.source.clone()).into());
    }

    if !ctx.quiet {
        ui::success(&format!(
            "Cache {} holds {} graph(s)",
            cache.dir().display(),
            cached_graphs
        ));
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
