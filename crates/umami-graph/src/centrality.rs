//! Node centrality.

use rustc_hash::FxHashMap;

use crate::{CooccurrenceGraph, Ingredient};

/// Scores every node of a graph.
pub trait CentralityMeasure {
    fn name(&self) -> &'static str;

    fn compute(&self, graph: &CooccurrenceGraph) -> Centrality;
}

/// Normalized degree: `degree(v) / (|V| - 1)`, and 0 when the graph has a
/// single node. Scores fall in `[0, 1]` since the graph has no self loops
/// or parallel edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl CentralityMeasure for DegreeCentrality {
    fn name(&self) -> &'static str {
        "degree"
    }

    fn compute(&self, graph: &CooccurrenceGraph) -> Centrality {
        let n = graph.node_count();
        let norm = if n > 1 { (n - 1) as f64 } else { 0.0 };

        let scores = graph
            .nodes()
            .into_iter()
            .map(|node| {
                let degree = graph.degree(node.as_str()).unwrap_or(0) as f64;
                let score = if norm > 0.0 { degree / norm } else { 0.0 };
                (node.clone(), score)
            })
            .collect();

        Centrality { scores }
    }
}

/// Per-node centrality scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centrality {
    scores: FxHashMap<Ingredient, f64>,
}

impl Centrality {
    pub fn from_scores(scores: FxHashMap<Ingredient, f64>) -> Self {
        Self { scores }
    }

    pub fn get(&self, node: &str) -> Option<f64> {
        self.scores.get(node).copied()
    }

    /// Score of `node`, or `default` when it has none.
    pub fn score_or(&self, node: &str, default: f64) -> f64 {
        self.get(node).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The `n` highest scores; ties in token order.
    pub fn top(&self, n: usize) -> Vec<(&Ingredient, f64)> {
        let mut ranked: Vec<_> = self.scores.iter().map(|(k, v)| (k, *v)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}
