//! Cache command implementation.

use anyhow::Context;
use serde::Serialize;

use crate::cli::{CacheAction, CacheArgs};
use crate::commands::{RunContext, utils};
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;
use umami_graph::GraphCache;
use umami_graph::cache::CacheTable;

/// One row of `umami cache list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheListing {
    pub table: &'static str,
    pub key: String,
    /// Corpus size encoded in the key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_size: Option<usize>,
}

/// Execute the cache command.
pub fn execute(args: CacheArgs, ctx: &RunContext<'_>) -> Result<()> {
    let config = utils::load_config(ctx, &ConfigOverrides::default())?;
    let cache = utils::open_cache(&config)?;

    match args.action {
        CacheAction::List => {
            let listing = list(&cache)?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        CacheAction::Clear => {
            let removed = list(&cache)?.len();
            cache
                .clear()
                .with_context(|| format!("Failed to clear {}", cache.dir().display()))?;
            if !ctx.quiet {
                ui::success(&format!("Removed {} cache entries", removed));
            }
        }
    }
    Ok(())
}

/// Entries of both cache tables, graphs first.
pub fn list(cache: &GraphCache) -> anyhow::Result<Vec<CacheListing>> {
    let mut listing = Vec::new();
    for table in [CacheTable::Graphs, CacheTable::Recipes] {
        let keys = cache
            .keys(table)
            .with_context(|| format!("Failed to read the {} table", table.name()))?;
        listing.extend(keys.into_iter().map(|key| CacheListing {
            table: table.name(),
            corpus_size: key.corpus_size_hint(),
            key: key.to_string(),
        }));
    }
    Ok(listing)
}
