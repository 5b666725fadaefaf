//! Shared utilities for command implementations.
//!
//! - Configuration loading and validation
//! - Canonicalizer construction from config
//! - Graph loading through the cached pipeline

use crate::commands::RunContext;
use crate::config::{ConfigOverrides, UmamiConfig};
use crate::error::{CliError, QueryError, Result, ResultExt};
use crate::ui;
use std::time::{Duration, Instant};
use umami_graph::{
    Canonicalizer, Error, GraphCache, GraphPipeline, JsonLinesSource, PipelineOutput,
    StandardCanonicalizer,
};

/// Load the merged configuration and validate it.
pub fn load_config(ctx: &RunContext<'_>, overrides: &ConfigOverrides) -> Result<UmamiConfig> {
    let config = UmamiConfig::load(ctx.config_path, overrides)?;
    config.validate()?;
    tracing::debug!(
        source = %config.source.display(),
        corpus_size = config.corpus_size,
        strategy = %config.strategy,
        community = %config.community,
        "configuration loaded"
    );
    Ok(config)
}

/// Canonicalizer configured with the aliases and ignore list from `config`.
pub fn canonicalizer(config: &UmamiConfig) -> StandardCanonicalizer {
    StandardCanonicalizer::new()
        .with_aliases(&config.aliases)
        .ignoring(&config.ignore)
}

/// Canonicalize user-supplied tokens the same way recipe ingredients are.
///
/// Tokens the canonicalizer rejects are kept trimmed so that they still
/// count as seeds (absent from the graph, hence ignored).
pub fn canonical_tokens(canonicalizer: &dyn Canonicalizer, raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|token| match canonicalizer.canonicalize(token) {
            Some(ingredient) => ingredient.into_string(),
            None => token.trim().to_string(),
        })
        .collect()
}

/// Open the graph cache named by the configuration.
pub fn open_cache(config: &UmamiConfig) -> Result<GraphCache> {
    GraphCache::open(config.cache_dir.clone())
        .context(format!("Failed to open cache in {}", config.cache_dir.display()))
}

/// A graph from the pipeline and how long it took.
pub struct LoadedGraph {
    pub output: PipelineOutput,
    pub elapsed: Duration,
}

/// Build or load the graph described by `config`.
pub fn load_graph(config: &UmamiConfig, ctx: &RunContext<'_>) -> Result<LoadedGraph> {
    let start = Instant::now();
    let canonicalizer = canonicalizer(config);
    let cache = open_cache(config)?;
    let mut source = JsonLinesSource::new(config.source.clone());
    let progress = ui::IngestProgress::new(ctx.quiet);

    let output = GraphPipeline::new(&mut source, &canonicalizer)
        .with_cache(&cache)
        .key_strategy(config.cache_key)
        .force_rebuild(config.force_rebuild)
        .observer(&progress)
        .build(config.corpus_size)
        .map_err(|err| graph_error(err, config))?;

    Ok(LoadedGraph {
        output,
        elapsed: start.elapsed(),
    })
}

/// Translate pipeline errors the user can act on into query errors.
pub fn graph_error(err: Error, config: &UmamiConfig) -> CliError {
    match err {
        Error::CorpusTooSmall {
            requested,
            available,
        } => QueryError::CorpusTooSmall {
            requested,
            available,
        }
        .into(),
        Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
            QueryError::SourceNotFound(config.source.clone()).into()
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, recipes: &str, corpus_size: usize) -> UmamiConfig {
        let source = dir.path().join("recipes.jsonl");
        fs::write(&source, recipes).unwrap();
        UmamiConfig {
            source,
            cache_dir: dir.path().join("cache"),
            corpus_size,
            ..UmamiConfig::default_config()
        }
    }

    const RECIPES: &str = r#"{"title": "stir fry", "ingredients": ["Beef", "Rice"]}
{"title": "pilaf", "ingredients": ["beef", "rice", "onion (chopped)"]}
"#;

    #[test]
    fn test_canonicalizer_uses_aliases_and_ignore() {
        let config = UmamiConfig {
            aliases: [("scallion".to_string(), "green onion".to_string())].into(),
            ignore: vec!["water".to_string()],
            ..UmamiConfig::default_config()
        };
        let canon = canonicalizer(&config);
        assert_eq!(
            canon.canonicalize("Scallion").map(|i| i.into_string()),
            Some("green onion".to_string())
        );
        assert!(canon.canonicalize("water").is_none());
    }

    #[test]
    fn test_canonical_tokens_keeps_rejected_tokens() {
        let canon = StandardCanonicalizer::new().ignoring(["salt"]);
        let tokens = canonical_tokens(
            &canon,
            &[" Beef ".to_string(), "Onion (sliced)".to_string(), "salt".to_string()],
        );
        assert_eq!(tokens, vec!["beef", "onion", "salt"]);
    }

    #[test]
    fn test_load_graph_builds_then_hits_cache() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, RECIPES, 2);
        let ctx = RunContext {
            quiet: true,
            ..RunContext::default()
        };

        let first = load_graph(&config, &ctx).unwrap();
        assert_eq!(first.output.origin, umami_graph::SnapshotOrigin::Source);
        assert_eq!(first.output.snapshot.graph.weight("beef", "rice"), Some(2));
        assert_eq!(first.output.snapshot.graph.weight("onion", "rice"), Some(1));

        let second = load_graph(&config, &ctx).unwrap();
        assert_eq!(second.output.origin, umami_graph::SnapshotOrigin::GraphCache);
        assert_eq!(second.output.snapshot.graph, first.output.snapshot.graph);
    }

    #[test]
    fn test_missing_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = UmamiConfig {
            source: dir.path().join("missing.jsonl"),
            cache_dir: dir.path().join("cache"),
            ..UmamiConfig::default_config()
        };
        let ctx = RunContext {
            quiet: true,
            ..RunContext::default()
        };
        let err = load_graph(&config, &ctx).err().unwrap();
        assert!(matches!(err, CliError::Query(QueryError::SourceNotFound(_))));
    }

    #[test]
    fn test_short_corpus_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, RECIPES, 5);
        let ctx = RunContext {
            quiet: true,
            ..RunContext::default()
        };
        let err = load_graph(&config, &ctx).err().unwrap();
        assert!(matches!(
            err,
            CliError::Query(QueryError::CorpusTooSmall {
                requested: 5,
                available: 2
            })
        ));
    }
}
