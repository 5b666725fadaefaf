//! End-to-end graph construction with memoization.
//!
//! [`GraphPipeline::build`] answers a request for a graph over the first `n`
//! recipes of a source: from the graph cache when possible, otherwise from a
//! cached recipe snapshot, otherwise by reading the source. Whatever had to
//! be computed is written back to the cache.

use crate::cache::{CacheKey, GraphCache, GraphSnapshot, KeyStrategy};
use crate::source::OpenSource;
use crate::{BuildReport, Canonicalizer, Error, GraphBuilder, Recipe, RecipeSource, Result};

/// Where the returned graph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Loaded from the graph cache; nothing was rebuilt.
    GraphCache,
    /// Built from a cached recipe snapshot.
    RecipeCache,
    /// Built from recipes read from the source.
    Source,
}

/// Progress callbacks for long builds.
pub trait BuildObserver {
    /// Called before the source is read.
    fn loading_started(&self, _total: usize) {}

    /// Called after each recipe pulled from the source.
    fn recipe_loaded(&self, _loaded: usize, _total: usize) {}

    /// Called once the graph is materialized.
    fn graph_built(&self, _report: &BuildReport) {}
}

/// Result of [`GraphPipeline::build`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub snapshot: GraphSnapshot,
    /// Build counters. All zero when the graph came from the graph cache.
    pub report: BuildReport,
    pub key: CacheKey,
    pub origin: SnapshotOrigin,
}

/// Source, canonicalizer and optional cache wired together.
pub struct GraphPipeline<'a> {
    source: &'a mut dyn RecipeSource,
    canonicalizer: &'a dyn Canonicalizer,
    cache: Option<&'a GraphCache>,
    key_strategy: KeyStrategy,
    force_rebuild: bool,
    observer: Option<&'a dyn BuildObserver>,
}

impl<'a> GraphPipeline<'a> {
    pub fn new(source: &'a mut dyn RecipeSource, canonicalizer: &'a dyn Canonicalizer) -> Self {
        Self {
            source,
            canonicalizer,
            cache: None,
            key_strategy: KeyStrategy::default(),
            force_rebuild: false,
            observer: None,
        }
    }

    pub fn with_cache(mut self, cache: &'a GraphCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Skip cache reads. Results are still written.
    pub fn force_rebuild(mut self, force: bool) -> Self {
        self.force_rebuild = force;
        self
    }

    pub fn observer(mut self, observer: &'a dyn BuildObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Cache key for a request of `corpus_size` recipes.
    ///
    /// Content keys fall back to size keys for sources that cannot
    /// fingerprint themselves.
    pub fn cache_key(&mut self, corpus_size: usize) -> Result<CacheKey> {
        match self.key_strategy {
            KeyStrategy::CorpusSize => Ok(CacheKey::corpus_size(corpus_size)),
            KeyStrategy::Content => match self.source.fingerprint()? {
                Some(fingerprint) => Ok(CacheKey::content(corpus_size, &fingerprint)),
                None => {
                    tracing::warn!(
                        source = %self.source.describe(),
                        "source cannot be fingerprinted, keying cache by corpus size"
                    );
                    Ok(CacheKey::corpus_size(corpus_size))
                }
            },
        }
    }

    /// Build or load the graph over the first `corpus_size` recipes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `corpus_size` is zero
    /// - [`Error::CorpusTooSmall`] if the source holds fewer recipes
    /// - [`Error::Cache`] for unreadable, mis-shaped or inconsistent entries
    pub fn build(&mut self, corpus_size: usize) -> Result<PipelineOutput> {
        if corpus_size == 0 {
            return Err(Error::InvalidInput(
                "corpus size must be at least 1".to_string(),
            ));
        }

        let key = self.cache_key(corpus_size)?;
        let readable = if self.force_rebuild { None } else { self.cache };

        if let Some(cache) = readable {
            if cache.is_available(&key)? {
                let snapshot = cache.load(&key)?;
                tracing::info!(%key, "graph cache hit");
                return Ok(PipelineOutput {
                    snapshot,
                    report: BuildReport::default(),
                    key,
                    origin: SnapshotOrigin::GraphCache,
                });
            }
            tracing::info!(%key, "graph cache miss");
        }

        let cached_recipes = match readable {
            Some(cache) if cache.has_recipes(&key)? => Some(cache.load_recipes(&key)?),
            _ => None,
        };
        let (recipes, origin) = match cached_recipes {
            Some(recipes) => {
                tracing::info!(%key, recipes = recipes.len(), "recipe cache hit");
                (recipes, SnapshotOrigin::RecipeCache)
            }
            None => {
                let recipes = self.read_source(corpus_size)?;
                if let Some(cache) = self.cache {
                    cache.save_recipes(&key, &recipes)?;
                }
                (recipes, SnapshotOrigin::Source)
            }
        };

        let mut builder = GraphBuilder::new(self.canonicalizer);
        for recipe in &recipes {
            builder.add_recipe(recipe);
        }
        let (graph, weights, report) = builder.finish_with_report();
        if let Some(observer) = self.observer {
            observer.graph_built(&report);
        }

        let snapshot = GraphSnapshot::new(graph, weights);
        if let Some(cache) = self.cache {
            cache.save(&key, &snapshot)?;
        }

        tracing::info!(
            %key,
            nodes = snapshot.graph.node_count(),
            edges = snapshot.graph.edge_count(),
            dropped = report.ingredients_dropped,
            "graph built"
        );
        Ok(PipelineOutput {
            snapshot,
            report,
            key,
            origin,
        })
    }

    fn read_source(&mut self, corpus_size: usize) -> Result<Vec<Recipe>> {
        let observer = self.observer;
        if let Some(observer) = observer {
            observer.loading_started(corpus_size);
        }

        let mut open = OpenSource::open(&mut *self.source)?;
        let recipes = open.take_with_progress(corpus_size, |loaded| {
            if let Some(observer) = observer {
                observer.recipe_loaded(loaded, corpus_size);
            }
        })?;
        open.close()?;

        Ok(recipes)
    }
}
