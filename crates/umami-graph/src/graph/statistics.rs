//! Aggregate graph statistics.

use serde::{Deserialize, Serialize};

use super::CooccurrenceGraph;

/// Summary numbers describing a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Sum of all edge weights.
    pub total_weight: u64,
    /// Nodes without any edge.
    pub isolated_nodes: usize,
    pub max_degree: usize,
    /// `2|E| / (|V| (|V| - 1))`, or 0 below two nodes.
    pub density: f64,
    pub component_count: usize,
}

impl GraphStatistics {
    pub fn new(graph: &CooccurrenceGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let degrees: Vec<usize> = graph
            .nodes()
            .into_iter()
            .filter_map(|node| graph.degree(node.as_str()))
            .collect();

        let density = if node_count > 1 {
            (2 * edge_count) as f64 / (node_count * (node_count - 1)) as f64
        } else {
            0.0
        };

        Self {
            node_count,
            edge_count,
            total_weight: graph.total_weight(),
            isolated_nodes: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            density,
            component_count: graph.connected_components().len(),
        }
    }
}

impl CooccurrenceGraph {
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ingredient;

    #[test]
    fn test_statistics_for_triangle_and_isolated_node() {
        let ing = |s: &str| Ingredient::new(s).unwrap();
        let mut graph = CooccurrenceGraph::new();
        graph.set_edge(ing("beef"), ing("rice"), 2);
        graph.set_edge(ing("beef"), ing("onion"), 1);
        graph.set_edge(ing("rice"), ing("onion"), 1);
        graph.add_node(ing("salt"));

        let stats = graph.statistics();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.total_weight, 4);
        assert_eq!(stats.isolated_nodes, 1);
        assert_eq!(stats.max_degree, 2);
        assert_eq!(stats.component_count, 2);
        assert!((stats.density - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_graph_statistics() {
        let stats = CooccurrenceGraph::new().statistics();
        assert_eq!(stats, GraphStatistics::default());
    }
}
