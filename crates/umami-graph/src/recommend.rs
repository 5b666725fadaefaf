//! Seed-anchored ingredient recommendations.
//!
//! Both strategies read the graph together with a community partition and a
//! centrality table computed once per engine:
//!
//! - [`Strategy::Adjacency`] sums edge weights from each seed to its
//!   neighbours.
//! - [`Strategy::Cooccurring`] scores ingredients that are common neighbours
//!   of seed pairs, falling back to the adjacency scan when no seed pair
//!   shares a neighbour.
//!
//! In both, candidates outside the seeds' communities are discarded, seeds
//! are never recommended, and results are ordered by score descending with
//! ties broken by token.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::centrality::{Centrality, CentralityMeasure, DegreeCentrality};
use crate::community::{CommunityDetector, CommunityId, GreedyModularity, Partition};
use crate::{CooccurrenceGraph, Error, Ingredient, Result};

/// Ranking strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Adjacency,
    Cooccurring,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Adjacency => write!(f, "adjacency"),
            Strategy::Cooccurring => write!(f, "cooccurring"),
        }
    }
}

/// A recommended ingredient and its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ingredient: Ingredient,
    pub score: f64,
}

/// Seeds resolved against the graph.
struct SeedSet<'s, 'g> {
    /// Distinct seed tokens in request order.
    tokens: Vec<&'s str>,
    /// Seeds that are graph nodes.
    present: Vec<&'g Ingredient>,
    targets: FxHashSet<CommunityId>,
}

impl SeedSet<'_, '_> {
    fn is_seed(&self, node: &str) -> bool {
        self.tokens.contains(&node)
    }
}

/// Query-time recommender. Borrows the graph read-only.
pub struct RecommendationEngine<'g> {
    graph: &'g CooccurrenceGraph,
    partition: Partition,
    centrality: Centrality,
}

impl<'g> RecommendationEngine<'g> {
    /// Engine using greedy modularity communities and degree centrality.
    pub fn new(graph: &'g CooccurrenceGraph) -> Self {
        Self::with_components(graph, &GreedyModularity::default(), &DegreeCentrality)
    }

    pub fn with_components(
        graph: &'g CooccurrenceGraph,
        detector: &dyn CommunityDetector,
        measure: &dyn CentralityMeasure,
    ) -> Self {
        let partition = detector.partition(graph);
        let centrality = measure.compute(graph);
        tracing::debug!(
            detector = detector.name(),
            centrality = measure.name(),
            communities = partition.len(),
            "recommendation engine ready"
        );
        Self::from_parts(graph, partition, centrality)
    }

    /// Engine over a precomputed partition and centrality table.
    pub fn from_parts(
        graph: &'g CooccurrenceGraph,
        partition: Partition,
        centrality: Centrality,
    ) -> Self {
        Self {
            graph,
            partition,
            centrality,
        }
    }

    pub fn graph(&self) -> &'g CooccurrenceGraph {
        self.graph
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn centrality(&self) -> &Centrality {
        &self.centrality
    }

    /// Top `count` tokens by adjacency score.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `seeds` is empty.
    pub fn recommend<S: AsRef<str>>(&self, seeds: &[S], count: usize) -> Result<Vec<Ingredient>> {
        Ok(tokens_of(self.recommend_scored(seeds, count)?))
    }

    pub fn recommend_scored<S: AsRef<str>>(
        &self,
        seeds: &[S],
        count: usize,
    ) -> Result<Vec<Recommendation>> {
        let seeds = self.resolve(seeds)?;
        let scores = self.adjacency_scores(&seeds);
        Ok(self.rank(scores, &seeds, count))
    }

    /// Top `count` tokens by pairwise common-neighbour score.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `seeds` is empty.
    pub fn recommend_cooccurring<S: AsRef<str>>(
        &self,
        seeds: &[S],
        count: usize,
    ) -> Result<Vec<Ingredient>> {
        Ok(tokens_of(self.recommend_cooccurring_scored(seeds, count)?))
    }

    pub fn recommend_cooccurring_scored<S: AsRef<str>>(
        &self,
        seeds: &[S],
        count: usize,
    ) -> Result<Vec<Recommendation>> {
        let seeds = self.resolve(seeds)?;

        let mut scores: FxHashMap<&'g Ingredient, f64> = FxHashMap::default();
        let mut common_neighbors_found = false;

        for (i, first) in seeds.present.iter().enumerate() {
            for second in &seeds.present[i + 1..] {
                let common = self.graph.common_neighbors(first.as_str(), second.as_str());
                if common.is_empty() {
                    continue;
                }
                common_neighbors_found = true;

                for neighbor in common {
                    if !self.in_targets(neighbor, &seeds) {
                        continue;
                    }
                    let weight = self.weight_or_one(first, neighbor)
                        + self.weight_or_one(second, neighbor);
                    *scores.entry(neighbor).or_insert(0.0) += weight * self.centrality_of(neighbor);
                }
            }
        }

        if !common_neighbors_found {
            tracing::debug!("no seed pair shares a neighbour, falling back to adjacency scan");
            for seed in &seeds.present {
                for (neighbor, weight) in self.graph.weighted_neighbors(seed.as_str()) {
                    if seeds.is_seed(neighbor.as_str()) || !self.in_targets(neighbor, &seeds) {
                        continue;
                    }
                    *scores.entry(neighbor).or_insert(0.0) +=
                        f64::from(weight) * self.centrality_of(neighbor);
                }
            }
        }

        Ok(self.rank(scores, &seeds, count))
    }

    /// Dispatch on `strategy`.
    pub fn recommend_with<S: AsRef<str>>(
        &self,
        strategy: Strategy,
        seeds: &[S],
        count: usize,
    ) -> Result<Vec<Recommendation>> {
        match strategy {
            Strategy::Adjacency => self.recommend_scored(seeds, count),
            Strategy::Cooccurring => self.recommend_cooccurring_scored(seeds, count),
        }
    }

    fn resolve<'s, S: AsRef<str>>(&self, seeds: &'s [S]) -> Result<SeedSet<'s, 'g>> {
        if seeds.is_empty() {
            return Err(Error::InvalidInput(
                "at least one seed ingredient is required".to_string(),
            ));
        }

        let mut tokens: Vec<&'s str> = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let token = seed.as_ref().trim();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        let graph = self.graph;
        let present: Vec<&'g Ingredient> = tokens
            .iter()
            .filter_map(|token| graph.node(token))
            .collect();
        let targets = present
            .iter()
            .filter_map(|seed| self.partition.community_of(seed.as_str()))
            .collect();

        tracing::debug!(
            seeds = tokens.len(),
            present = present.len(),
            "resolved seed ingredients"
        );
        Ok(SeedSet {
            tokens,
            present,
            targets,
        })
    }

    fn adjacency_scores(&self, seeds: &SeedSet<'_, 'g>) -> FxHashMap<&'g Ingredient, f64> {
        let mut weights: FxHashMap<&'g Ingredient, f64> = FxHashMap::default();
        for seed in &seeds.present {
            for (neighbor, weight) in self.graph.weighted_neighbors(seed.as_str()) {
                if !self.in_targets(neighbor, seeds) {
                    continue;
                }
                *weights.entry(neighbor).or_insert(0.0) += f64::from(weight);
            }
        }

        weights
            .into_iter()
            .map(|(node, weight)| (node, weight * self.centrality_of(node)))
            .collect()
    }

    fn in_targets(&self, node: &Ingredient, seeds: &SeedSet<'_, '_>) -> bool {
        self.partition
            .community_of(node.as_str())
            .is_some_and(|id| seeds.targets.contains(&id))
    }

    fn centrality_of(&self, node: &Ingredient) -> f64 {
        self.centrality.score_or(node.as_str(), 1.0)
    }

    fn weight_or_one(&self, a: &Ingredient, b: &Ingredient) -> f64 {
        f64::from(self.graph.weight(a.as_str(), b.as_str()).unwrap_or(1))
    }

    fn rank(
        &self,
        scores: FxHashMap<&'g Ingredient, f64>,
        seeds: &SeedSet<'_, 'g>,
        count: usize,
    ) -> Vec<Recommendation> {
        let mut ranked: Vec<(&Ingredient, f64)> = scores
            .into_iter()
            .filter(|(node, _)| !seeds.is_seed(node.as_str()))
            .collect();
        let candidates = ranked.len();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(count);

        tracing::debug!(candidates, returned = ranked.len(), "ranked recommendations");
        ranked
            .into_iter()
            .map(|(ingredient, score)| Recommendation {
                ingredient: ingredient.clone(),
                score,
            })
            .collect()
    }
}

fn tokens_of(recommendations: Vec<Recommendation>) -> Vec<Ingredient> {
    recommendations.into_iter().map(|r| r.ingredient).collect()
}
