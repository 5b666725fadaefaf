//! The undirected, weighted ingredient co-occurrence graph.
//!
//! Nodes are canonical [`Ingredient`] tokens; an edge between two tokens
//! carries the number of recipes in which both appeared. Functionality is
//! split across files as inherent `impl` blocks:
//!
//! - [`builder`] - corpus ingestion into a graph and weight map
//! - [`queries`] - read-only diagnostics (paths, components, clusters)
//! - [`statistics`] - aggregate counts
//! - [`serialization`] - JSON and DOT export

pub mod builder;
pub mod queries;
pub mod serialization;
pub mod statistics;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{Ingredient, IngredientPair};

/// Accumulated co-occurrence counts keyed by sorted ingredient pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeWeights(FxHashMap<IngredientPair, u32>);

impl EdgeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more recipe containing `pair`.
    pub fn increment(&mut self, pair: IngredientPair) {
        *self.0.entry(pair).or_insert(0) += 1;
    }

    pub fn get(&self, pair: &IngredientPair) -> Option<u32> {
        self.0.get(pair).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IngredientPair, u32)> {
        self.0.iter().map(|(pair, weight)| (pair, *weight))
    }

    /// Sum of all counters, i.e. the number of increments recorded.
    pub fn total_increments(&self) -> u64 {
        self.0.values().map(|&w| u64::from(w)).sum()
    }

    /// Add `other`'s counters into `self`.
    ///
    /// Summation is associative and commutative, so partial maps built from
    /// disjoint slices of a corpus can be combined in any order.
    pub fn merge(&mut self, other: &EdgeWeights) {
        for (pair, weight) in other.iter() {
            *self.0.entry(pair.clone()).or_insert(0) += weight;
        }
    }
}

impl FromIterator<(IngredientPair, u32)> for EdgeWeights {
    fn from_iter<T: IntoIterator<Item = (IngredientPair, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Undirected weighted graph over ingredient tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceGraph {
    adjacency: FxHashMap<Ingredient, FxHashMap<Ingredient, u32>>,
    edge_count: usize,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a graph from a node set and an accumulated weight map.
    pub fn from_weights<I>(nodes: I, weights: &EdgeWeights) -> Self
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (pair, weight) in weights.iter() {
            graph.set_edge(pair.first().clone(), pair.second().clone(), weight);
        }
        graph
    }

    /// Insert a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: Ingredient) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, FxHashMap::default());
        true
    }

    /// Set the weight of edge `a -- b`, inserting missing endpoints.
    ///
    /// Self loops and zero weights are ignored.
    pub fn set_edge(&mut self, a: Ingredient, b: Ingredient, weight: u32) {
        if a == b || weight == 0 {
            return;
        }
        self.add_node(a.clone());
        self.add_node(b.clone());

        let previous = self
            .adjacency
            .get_mut(&a)
            .and_then(|neighbors| neighbors.insert(b.clone(), weight));
        if let Some(neighbors) = self.adjacency.get_mut(&b) {
            neighbors.insert(a, weight);
        }
        if previous.is_none() {
            self.edge_count += 1;
        }
    }

    /// The stored token equal to `token`, if it is a node.
    pub fn node(&self, token: &str) -> Option<&Ingredient> {
        self.adjacency.get_key_value(token).map(|(node, _)| node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All nodes in token order.
    pub fn nodes(&self) -> Vec<&Ingredient> {
        let mut nodes: Vec<_> = self.adjacency.keys().collect();
        nodes.sort();
        nodes
    }

    /// Neighbours of `node` in token order; empty if the node is absent.
    pub fn neighbors(&self, node: &str) -> Vec<&Ingredient> {
        let mut neighbors: Vec<_> = self
            .adjacency
            .get(node)
            .map(|n| n.keys().collect())
            .unwrap_or_default();
        neighbors.sort();
        neighbors
    }

    /// Unordered view of `node`'s neighbours with edge weights.
    pub fn weighted_neighbors(&self, node: &str) -> impl Iterator<Item = (&Ingredient, u32)> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|n| n.iter().map(|(neighbor, weight)| (neighbor, *weight)))
    }

    pub(crate) fn neighbor_set(&self, node: &str) -> FxHashSet<&Ingredient> {
        self.adjacency
            .get(node)
            .map(|n| n.keys().collect())
            .unwrap_or_default()
    }

    /// Weight of edge `a -- b`, if the edge exists.
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        self.adjacency.get(a).and_then(|n| n.get(b)).copied()
    }

    /// Number of distinct neighbours, or `None` for an absent node.
    pub fn degree(&self, node: &str) -> Option<usize> {
        self.adjacency.get(node).map(FxHashMap::len)
    }

    /// Sum of the weights of `node`'s edges.
    pub fn weighted_degree(&self, node: &str) -> u64 {
        self.weighted_neighbors(node)
            .map(|(_, weight)| u64::from(weight))
            .sum()
    }

    /// Every edge once, as `(low, high, weight)` in pair order.
    pub fn edges(&self) -> Vec<(&Ingredient, &Ingredient, u32)> {
        let mut edges: Vec<_> = self
            .adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |(b, _)| a < *b)
                    .map(move |(b, weight)| (a, b, *weight))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> u64 {
        self.edges().iter().map(|(_, _, w)| u64::from(*w)).sum()
    }

    /// The weight map this graph materializes.
    pub fn edge_weights(&self) -> EdgeWeights {
        self.edges()
            .into_iter()
            .filter_map(|(a, b, weight)| {
                IngredientPair::new(a.clone(), b.clone()).map(|pair| (pair, weight))
            })
            .collect()
    }

    /// Subgraph induced by the given node set. Unknown nodes are ignored.
    pub fn induced_subgraph<'a, I>(&self, nodes: I) -> CooccurrenceGraph
    where
        I: IntoIterator<Item = &'a Ingredient>,
    {
        let keep: FxHashSet<&Ingredient> = nodes
            .into_iter()
            .filter(|node| self.contains(node.as_str()))
            .collect();

        let mut subgraph = CooccurrenceGraph::new();
        for node in &keep {
            subgraph.add_node((*node).clone());
        }
        for node in &keep {
            for (neighbor, weight) in self.weighted_neighbors(node.as_str()) {
                if node < &neighbor && keep.contains(neighbor) {
                    subgraph.set_edge((*node).clone(), neighbor.clone(), weight);
                }
            }
        }
        subgraph
    }

    /// Check structural invariants: symmetric adjacency, no self loops,
    /// positive weights and a consistent edge count.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut half_edges = 0usize;
        for (node, neighbors) in &self.adjacency {
            for (neighbor, weight) in neighbors {
                if node == neighbor {
                    return Err(format!("self loop on '{node}'"));
                }
                if *weight == 0 {
                    return Err(format!("zero weight on '{node} -- {neighbor}'"));
                }
                if self.weight(neighbor.as_str(), node.as_str()) != Some(*weight) {
                    return Err(format!("asymmetric edge '{node} -- {neighbor}'"));
                }
                half_edges += 1;
            }
        }
        if half_edges != self.edge_count * 2 {
            return Err(format!(
                "edge count {} does not match adjacency ({} half edges)",
                self.edge_count, half_edges
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(token: &str) -> Ingredient {
        Ingredient::new(token).unwrap()
    }

    fn pair(a: &str, b: &str) -> IngredientPair {
        IngredientPair::new(ing(a), ing(b)).unwrap()
    }

    #[test]
    fn test_set_edge_is_symmetric() {
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("beef"), ing("rice"), 2);

        assert_eq!(graph.weight("beef", "rice"), Some(2));
        assert_eq!(graph.weight("rice", "beef"), Some(2));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn test_self_loops_and_zero_weights_are_rejected() {
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("beef"), ing("beef"), 1);
        graph.set_edge(ing("beef"), ing("rice"), 0);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_overwriting_edge_keeps_count() {
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("beef"), ing("rice"), 1);
        graph.set_edge(ing("rice"), ing("beef"), 3);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("beef", "rice"), Some(3));
    }

    #[test]
    fn test_degree_of_absent_node_is_none() {
        let mut graph = CooccurrenceGraph::new();
        graph.add_node(ing("salt"));

        assert_eq!(graph.degree("salt"), Some(0));
        assert_eq!(graph.degree("pepper"), None);
        assert!(graph.neighbors("pepper").is_empty());
    }

    #[test]
    fn test_edge_weights_round_trip_through_graph() {
        let mut weights = EdgeWeights::new();
        weights.increment(pair("beef", "rice"));
        weights.increment(pair("rice", "beef"));
        weights.increment(pair("beef", "onion"));

        let graph = CooccurrenceGraph::from_weights([ing("salt")], &weights);

        assert_eq!(graph.edge_weights(), weights);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.total_weight(), 3);
    }

    #[test]
    fn test_merge_sums_counters() {
        let mut left = EdgeWeights::new();
        left.increment(pair("beef", "rice"));
        let mut right = EdgeWeights::new();
        right.increment(pair("beef", "rice"));
        right.increment(pair("egg", "rice"));

        left.merge(&right);

        assert_eq!(left.get(&pair("beef", "rice")), Some(2));
        assert_eq!(left.get(&pair("egg", "rice")), Some(1));
        assert_eq!(left.total_increments(), 3);
    }

    #[test]
    fn test_induced_subgraph_keeps_internal_edges_only() {
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("a"), ing("b"), 1);
        graph.set_edge(ing("b"), ing("c"), 4);
        graph.set_edge(ing("c"), ing("d"), 1);

        let b = ing("b");
        let c = ing("c");
        let missing = ing("zzz");
        let sub = graph.induced_subgraph([&b, &c, &missing]);

        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.weight("b", "c"), Some(4));
    }

    #[test]
    fn test_edges_are_listed_once_in_order() {
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("rice"), ing("beef"), 2);
        graph.set_edge(ing("onion"), ing("beef"), 1);

        let edges: Vec<_> = graph
            .edges()
            .into_iter()
            .map(|(a, b, w)| (a.as_str(), b.as_str(), w))
            .collect();
        assert_eq!(edges, vec![("beef", "onion", 1), ("beef", "rice", 2)]);
    }
}
