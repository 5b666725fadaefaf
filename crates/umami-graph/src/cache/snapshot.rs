//! Serializable cache entries.

use serde::{Deserialize, Serialize};

use super::CacheError;
use crate::{CooccurrenceGraph, EdgeWeights, Recipe};

/// Current cache format version. Increment when the entry layout changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Metadata stored alongside every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// umami-graph version that wrote the entry.
    pub version: String,
    pub format_version: u32,
    /// Unix timestamp of the write.
    pub created_at: u64,
}

impl CacheMetadata {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format_version: CACHE_FORMAT_VERSION,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn is_compatible(&self) -> bool {
        self.format_version == CACHE_FORMAT_VERSION
    }
}

impl Default for CacheMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// The graph layer's payload: the graph and the weight map it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub graph: CooccurrenceGraph,
    pub weights: EdgeWeights,
}

impl GraphSnapshot {
    pub fn new(graph: CooccurrenceGraph, weights: EdgeWeights) -> Self {
        Self { graph, weights }
    }

    pub fn into_parts(self) -> (CooccurrenceGraph, EdgeWeights) {
        (self.graph, self.weights)
    }

    /// Check that the graph is well formed and that its edges are exactly the
    /// weight map.
    pub fn validate(&self) -> Result<(), CacheError> {
        self.graph.check_invariants().map_err(CacheError::Corrupted)?;

        if let Some(node) = self.graph.nodes().into_iter().find(|n| n.as_str().trim().is_empty()) {
            return Err(CacheError::Corrupted(format!("empty token '{node}'")));
        }
        if self.graph.edge_weights() != self.weights {
            return Err(CacheError::Corrupted(format!(
                "graph has {} edges but weight map has {} pairs or differs in weights",
                self.graph.edge_count(),
                self.weights.len()
            )));
        }
        Ok(())
    }
}

/// A stored value: either a built graph or the raw recipe snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Snapshot {
    Graph(GraphSnapshot),
    Recipes(Vec<Recipe>),
}

impl Snapshot {
    /// Short name of the variant, used in shape errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Snapshot::Graph(_) => "graph",
            Snapshot::Recipes(_) => "recipes",
        }
    }
}

/// Borrowed form of [`Snapshot`] for writing without cloning.
///
/// Must stay layout-compatible with [`Snapshot`]: same variant order and
/// payload types.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename = "Snapshot")]
pub enum SnapshotRef<'a> {
    Graph(&'a GraphSnapshot),
    Recipes(&'a [Recipe]),
}

/// Stored entry: metadata plus payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CachedEntry {
    pub metadata: CacheMetadata,
    pub snapshot: Snapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename = "CachedEntry")]
pub(crate) struct CachedEntryRef<'a> {
    pub metadata: CacheMetadata,
    pub snapshot: SnapshotRef<'a>,
}
