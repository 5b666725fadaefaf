//! # umami-graph
//!
//! Ingredient co-occurrence graphs and the recommendation engine built on
//! them.
//!
//! ## Overview
//!
//! A corpus of recipes becomes an undirected graph whose nodes are canonical
//! ingredient tokens and whose edge weights count the recipes in which two
//! ingredients appear together. Queries of the form "given beef and rice,
//! suggest five related ingredients" are answered by combining those weights
//! with community structure and degree centrality.
//!
//! ## Architecture
//!
//! ```text
//!   RecipeSource ──► GraphBuilder ──► GraphCache (redb)
//!        │         (Canonicalizer)        │
//!        └────────── GraphPipeline ───────┘
//!                          │
//!                          ▼
//!                  CooccurrenceGraph
//!                    │           │
//!                    ▼           ▼
//!         CommunityDetector   CentralityMeasure
//!                    └─────┬─────┘
//!                          ▼
//!                RecommendationEngine
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use umami_graph::{GraphBuilder, Recipe, RecommendationEngine, StandardCanonicalizer};
//!
//! # fn main() -> umami_graph::Result<()> {
//! let recipes = vec![
//!     Recipe::from_names(["beef", "rice"]),
//!     Recipe::from_names(["beef", "rice", "onion"]),
//! ];
//! let canonicalizer = StandardCanonicalizer::new();
//! let (graph, _weights) = GraphBuilder::build(&canonicalizer, &recipes);
//!
//! let engine = RecommendationEngine::new(&graph);
//! let suggestions = engine.recommend(&["beef", "rice"], 5)?;
//! assert_eq!(suggestions[0].as_str(), "onion");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error policy
//!
//! Malformed cache entries and empty seed lists are errors. Absent seeds,
//! unknown nodes and disconnected pairs are not: they produce empty or
//! `None` results. Ingredients the canonicalizer cannot represent are
//! dropped from the graph and counted in the [`BuildReport`].

pub mod cache;
pub mod canonical;
pub mod centrality;
pub mod community;
pub mod graph;
pub mod ingredient;
pub mod pipeline;
pub mod recipe;
pub mod recommend;
pub mod source;

pub use cache::{CacheError, CacheKey, GraphCache, GraphSnapshot, KeyStrategy};
pub use canonical::{Canonicalizer, StandardCanonicalizer};
pub use centrality::{Centrality, CentralityMeasure, DegreeCentrality};
pub use community::{
    CommunityDetector, CommunityId, CommunitySummary, DetectorKind, GreedyModularity, Louvain,
    Partition, modularity,
};
pub use graph::builder::{BuildReport, GraphBuilder};
pub use graph::queries::{ClusterSummary, IngredientPath, RankedIngredient};
pub use graph::statistics::GraphStatistics;
pub use graph::{CooccurrenceGraph, EdgeWeights};
pub use ingredient::{Ingredient, IngredientPair};
pub use pipeline::{BuildObserver, GraphPipeline, PipelineOutput, SnapshotOrigin};
pub use recipe::{IngredientLine, Recipe};
pub use recommend::{Recommendation, RecommendationEngine, Strategy};
pub use source::{InMemorySource, JsonLinesSource, OpenSource, RecipeSource};

#[cfg(test)]
mod tests;

/// Error type for graph construction, caching and queries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request the caller must fix, such as an empty seed list.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A recipe record could not be read.
    #[error("recipe source error: {0}")]
    Source(String),

    #[error("corpus too small: requested {requested} recipes but the source has {available}")]
    CorpusTooSmall { requested: usize, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for umami-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
