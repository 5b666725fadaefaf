//! Persistent graph cache.
//!
//! A pure memoization layer: a key maps to a built graph (or to the recipe
//! snapshot it was built from) and entries are never invalidated by content
//! drift. Use [`KeyStrategy::Content`] to fold a corpus fingerprint into the
//! key when that matters.
//!
//! # Usage
//!
//! ```rust,no_run
//! use umami_graph::cache::{CacheKey, GraphCache, GraphSnapshot};
//!
//! # fn main() -> umami_graph::Result<()> {
//! let cache = GraphCache::open(".cache/umami")?;
//! let key = CacheKey::corpus_size(1000);
//! if cache.is_available(&key)? {
//!     let snapshot = cache.load(&key)?;
//!     println!("{} nodes", snapshot.graph.node_count());
//! }
//! # Ok(())
//! # }
//! ```

mod key;
mod snapshot;
mod storage;

pub use key::{CacheKey, KeyStrategy, fingerprint_recipes};
pub use snapshot::{
    CACHE_FORMAT_VERSION, CacheMetadata, CachedEntry, GraphSnapshot, Snapshot, SnapshotRef,
};
pub use storage::{CacheError, CacheStore, CacheTable};

use std::path::{Path, PathBuf};

use crate::Recipe;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Graph and recipe snapshots persisted in a redb store.
pub struct GraphCache {
    dir: PathBuf,
    store: CacheStore,
}

impl GraphCache {
    /// Open or create the cache in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        let store = CacheStore::open(&dir)?;
        Ok(Self { dir, store })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a graph entry exists under `key`.
    pub fn is_available(&self, key: &CacheKey) -> CacheResult<bool> {
        self.store.contains(CacheTable::Graphs, key)
    }

    /// Load the graph entry under `key`.
    ///
    /// # Errors
    ///
    /// `CacheMiss` when absent, `InvalidShape` when the entry is not a graph
    /// snapshot, `Corrupted` when the graph and weight map disagree. Shape
    /// and consistency failures are never coerced into an empty graph.
    pub fn load(&self, key: &CacheKey) -> CacheResult<GraphSnapshot> {
        let entry = self.store.get(CacheTable::Graphs, key)?;
        let snapshot = match entry.snapshot {
            Snapshot::Graph(snapshot) => snapshot,
            other => {
                return Err(CacheError::InvalidShape {
                    expected: "graph",
                    found: other.kind(),
                });
            }
        };
        snapshot.validate()?;

        tracing::debug!(
            %key,
            nodes = snapshot.graph.node_count(),
            edges = snapshot.graph.edge_count(),
            "loaded graph snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, key: &CacheKey, snapshot: &GraphSnapshot) -> CacheResult<()> {
        self.store
            .put(CacheTable::Graphs, key, SnapshotRef::Graph(snapshot))?;
        tracing::debug!(%key, "saved graph snapshot");
        Ok(())
    }

    pub fn has_recipes(&self, key: &CacheKey) -> CacheResult<bool> {
        self.store.contains(CacheTable::Recipes, key)
    }

    /// Load the recipe snapshot under `key`.
    pub fn load_recipes(&self, key: &CacheKey) -> CacheResult<Vec<Recipe>> {
        match self.store.get(CacheTable::Recipes, key)?.snapshot {
            Snapshot::Recipes(recipes) => Ok(recipes),
            other => Err(CacheError::InvalidShape {
                expected: "recipes",
                found: other.kind(),
            }),
        }
    }

    pub fn save_recipes(&self, key: &CacheKey, recipes: &[Recipe]) -> CacheResult<()> {
        self.store
            .put(CacheTable::Recipes, key, SnapshotRef::Recipes(recipes))
    }

    /// Keys of one layer, in key order.
    pub fn keys(&self, table: CacheTable) -> CacheResult<Vec<CacheKey>> {
        self.store.keys(table)
    }

    /// Remove `key` from both layers. Returns whether anything was removed.
    pub fn remove(&self, key: &CacheKey) -> CacheResult<bool> {
        let graph = self.store.remove(CacheTable::Graphs, key)?;
        let recipes = self.store.remove(CacheTable::Recipes, key)?;
        Ok(graph || recipes)
    }

    pub fn clear(&self) -> CacheResult<()> {
        self.store.clear()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Ingredient};
    use tempfile::TempDir;

    fn identity(raw: &str) -> Option<Ingredient> {
        Ingredient::new(raw)
    }

    fn sample_snapshot() -> GraphSnapshot {
        let recipes = vec![
            Recipe::from_names(["beef", "rice"]),
            Recipe::from_names(["beef", "rice", "onion"]),
        ];
        let (graph, weights) = GraphBuilder::build(&identity, &recipes);
        GraphSnapshot::new(graph, weights)
    }

    #[test]
    fn test_save_then_load_reproduces_snapshot() {
        let dir = TempDir::new().unwrap();
        let cache = GraphCache::open(dir.path()).unwrap();
        let key = CacheKey::corpus_size(2);
        let snapshot = sample_snapshot();

        assert!(!cache.is_available(&key).unwrap());
        cache.save(&key, &snapshot).unwrap();
        assert!(cache.is_available(&key).unwrap());

        assert_eq!(cache.load(&key).unwrap(), snapshot);
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let key = CacheKey::corpus_size(2);
        let snapshot = sample_snapshot();
        {
            let cache = GraphCache::open(dir.path()).unwrap();
            cache.save(&key, &snapshot).unwrap();
        }

        let cache = GraphCache::open(dir.path()).unwrap();
        assert_eq!(cache.load(&key).unwrap(), snapshot);
    }

    #[test]
    fn test_wrong_shape_is_fatal() {
        let dir = TempDir::new().unwrap();
        let cache = GraphCache::open(dir.path()).unwrap();
        let key = CacheKey::corpus_size(1);
        let recipes = vec![Recipe::from_names(["beef"])];

        cache
            .store()
            .put(CacheTable::Graphs, &key, SnapshotRef::Recipes(&recipes))
            .unwrap();

        let err = cache.load(&key).unwrap_err();
        assert!(matches!(
            err,
            CacheError::InvalidShape {
                expected: "graph",
                found: "recipes"
            }
        ));
    }

    #[test]
    fn test_inconsistent_snapshot_is_corrupted() {
        let dir = TempDir::new().unwrap();
        let cache = GraphCache::open(dir.path()).unwrap();
        let key = CacheKey::corpus_size(2);
        let mut snapshot = sample_snapshot();
        snapshot.weights = crate::EdgeWeights::new();

        cache.save(&key, &snapshot).unwrap();
        assert!(matches!(cache.load(&key), Err(CacheError::Corrupted(_))));
    }

    #[test]
    fn test_recipes_layer_and_remove() {
        let dir = TempDir::new().unwrap();
        let cache = GraphCache::open(dir.path()).unwrap();
        let key = CacheKey::corpus_size(1);
        let recipes = vec![Recipe::from_names(["beef", "rice"])];

        cache.save_recipes(&key, &recipes).unwrap();
        assert!(cache.has_recipes(&key).unwrap());
        assert!(!cache.is_available(&key).unwrap());
        assert_eq!(cache.load_recipes(&key).unwrap(), recipes);

        assert!(cache.remove(&key).unwrap());
        assert!(!cache.has_recipes(&key).unwrap());
    }
}
