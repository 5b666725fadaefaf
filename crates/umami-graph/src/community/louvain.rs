//! Multi-level Louvain.
//!
//! Each level runs local moving over a graph of super-nodes, then collapses
//! every community into one super-node whose internal edge mass becomes a
//! self loop. Levels repeat until local moving leaves every super-node where
//! it started.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::{CommunityDetector, Partition};
use crate::{CooccurrenceGraph, Ingredient};

/// Minimum improvement for a node to leave its community.
const MIN_GAIN: f64 = 1e-10;

/// Louvain community detection.
///
/// Within a level, nodes are visited in index order (token order on the
/// first level) and moved to the neighbouring community with the largest
/// modularity gain until a full pass moves nothing or `max_passes` is
/// reached. Weighted by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Louvain {
    pub weighted: bool,
    /// Local moving passes per level.
    pub max_passes: usize,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            weighted: true,
            max_passes: 100,
        }
    }
}

/// One level of the hierarchy. `adjacency` excludes self loops; `degree`
/// counts them twice.
struct Level {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    degree: Vec<f64>,
}

impl Level {
    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Local moving. Returns each node's community, relabelled densely in
    /// order of first appearance, and the pass count.
    fn local_moving(&self, two_m: f64, max_passes: usize) -> (Vec<usize>, usize) {
        let mut community: Vec<usize> = (0..self.len()).collect();
        let mut totals = self.degree.clone();
        let mut passes = 0;
        let mut improved = true;

        while improved && passes < max_passes {
            improved = false;
            passes += 1;

            for node in 0..self.len() {
                if self.adjacency[node].is_empty() {
                    continue;
                }
                let current = community[node];
                let k_i = self.degree[node];

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for &(neighbor, w) in &self.adjacency[node] {
                    *links.entry(community[neighbor]).or_insert(0.0) += w;
                }

                totals[current] -= k_i;
                let gain = |c: usize, k_in: f64| k_in - totals[c] * k_i / two_m;

                let stay = gain(current, links.get(&current).copied().unwrap_or(0.0));
                let mut best = (current, stay);
                for (&candidate, &k_in) in &links {
                    let g = gain(candidate, k_in);
                    if g > best.1 + MIN_GAIN {
                        best = (candidate, g);
                    }
                }

                totals[best.0] += k_i;
                if best.0 != current {
                    community[node] = best.0;
                    improved = true;
                }
            }
        }

        let mut labels: FxHashMap<usize, usize> = FxHashMap::default();
        let dense = community
            .into_iter()
            .map(|c| {
                let next = labels.len();
                *labels.entry(c).or_insert(next)
            })
            .collect();
        (dense, passes)
    }

    /// Collapse each of the `count` communities into a single node.
    fn aggregate(&self, community: &[usize], count: usize) -> Level {
        let mut self_loops = vec![0.0; count];
        let mut degree = vec![0.0; count];
        let mut links: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];

        for node in 0..self.len() {
            let c = community[node];
            self_loops[c] += self.self_loops[node];
            degree[c] += self.degree[node];
            for &(neighbor, w) in &self.adjacency[node] {
                let d = community[neighbor];
                if c != d {
                    *links[c].entry(d).or_insert(0.0) += w;
                } else if node < neighbor {
                    self_loops[c] += w;
                }
            }
        }

        Level {
            adjacency: links.into_iter().map(|row| row.into_iter().collect()).collect(),
            self_loops,
            degree,
        }
    }
}

impl CommunityDetector for Louvain {
    fn name(&self) -> &'static str {
        "louvain"
    }

    fn partition(&self, graph: &CooccurrenceGraph) -> Partition {
        let nodes = graph.nodes();
        let index: FxHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.as_str(), i))
            .collect();
        let mass = |w: u32| if self.weighted { f64::from(w) } else { 1.0 };

        let adjacency: Vec<Vec<(usize, f64)>> = nodes
            .iter()
            .map(|node| {
                let mut row: Vec<(usize, f64)> = graph
                    .weighted_neighbors(node.as_str())
                    .map(|(neighbor, w)| (index[neighbor.as_str()], mass(w)))
                    .collect();
                row.sort_by_key(|(j, _)| *j);
                row
            })
            .collect();
        let degree: Vec<f64> = adjacency
            .iter()
            .map(|row| row.iter().map(|(_, w)| w).sum())
            .collect();
        let two_m: f64 = degree.iter().sum();
        if two_m == 0.0 {
            return Partition::singletons(graph);
        }

        let mut level = Level {
            self_loops: vec![0.0; nodes.len()],
            adjacency,
            degree,
        };
        let mut membership: Vec<usize> = (0..nodes.len()).collect();
        let mut levels = 0;
        let mut passes = 0;

        loop {
            let (community, level_passes) = level.local_moving(two_m, self.max_passes);
            passes += level_passes;
            let count = community.iter().max().map_or(0, |&c| c + 1);
            if count == level.len() {
                break;
            }

            levels += 1;
            for slot in &mut membership {
                *slot = community[*slot];
            }
            level = level.aggregate(&community, count);
        }

        let mut groups: BTreeMap<usize, Vec<Ingredient>> = BTreeMap::new();
        for (node, &c) in membership.iter().enumerate() {
            groups.entry(c).or_default().push(nodes[node].clone());
        }
        let partition = Partition::from_groups(groups.into_values().collect());

        tracing::debug!(
            detector = self.name(),
            levels,
            passes,
            communities = partition.len(),
            "partitioned graph"
        );
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::super::modularity;
    use super::super::tests::{graph, ing, karate_club, two_triangles};
    use super::super::GreedyModularity;
    use super::*;

    #[test]
    fn test_two_triangles_split_at_bridge() {
        let g = two_triangles();
        let partition = Louvain::default().partition(&g);

        assert_eq!(partition.len(), 2);
        assert_eq!(partition.community_of("a"), partition.community_of("b"));
        assert_eq!(partition.community_of("e"), partition.community_of("f"));
        assert_ne!(partition.community_of("a"), partition.community_of("f"));
        assert!(modularity(&g, &partition, true) > 0.35);
    }

    #[test]
    fn test_isolated_nodes_stay_singletons() {
        let mut g = graph(&[("beef", "rice", 3), ("rice", "egg", 1)]);
        g.add_node(ing("salt"));

        let partition = Louvain::default().partition(&g);

        assert_eq!(partition.node_count(), 4);
        let salt = partition.community_of("salt").unwrap();
        assert_eq!(partition.members(salt).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_pass_limit_is_respected() {
        let g = two_triangles();
        let partition = Louvain {
            weighted: false,
            max_passes: 0,
        }
        .partition(&g);

        assert_eq!(partition.len(), 6);
    }

    #[test]
    fn test_karate_club_beats_greedy_baseline() {
        let g = karate_club();
        let louvain = Louvain::default().partition(&g);
        let greedy = GreedyModularity::default().partition(&g);

        let q_louvain = modularity(&g, &louvain, false);
        let q_greedy = modularity(&g, &greedy, false);

        assert_eq!(louvain.node_count(), 34);
        assert!(q_greedy > 0.38, "greedy q = {q_greedy}");
        assert!(
            q_louvain >= q_greedy - 1e-9,
            "louvain q = {q_louvain}, greedy q = {q_greedy}"
        );
        assert!(q_louvain > 0.41, "louvain q = {q_louvain}");
        assert_eq!(louvain.len(), 4);
    }

    #[test]
    fn test_aggregate_keeps_internal_mass_as_self_loops() {
        // a-b-c and d-e-f triangles joined by c-d, as produced by local moving.
        fn unit(row: &[usize]) -> Vec<(usize, f64)> {
            row.iter().map(|&j| (j, 1.0)).collect()
        }
        let level = Level {
            adjacency: vec![
                unit(&[1, 2]),
                unit(&[0, 2]),
                unit(&[0, 1, 3]),
                unit(&[2, 4, 5]),
                unit(&[3, 5]),
                unit(&[3, 4]),
            ],
            self_loops: vec![0.0; 6],
            degree: vec![2.0, 2.0, 3.0, 3.0, 2.0, 2.0],
        };

        let merged = level.aggregate(&[0, 0, 0, 1, 1, 1], 2);

        assert_eq!(merged.self_loops, vec![3.0, 3.0]);
        assert_eq!(merged.degree, vec![7.0, 7.0]);
        assert_eq!(merged.adjacency, vec![vec![(1, 1.0)], vec![(0, 1.0)]]);

        let (community, _) = merged.local_moving(14.0, 100);
        assert_eq!(community, vec![0, 1]);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let g = karate_club();
        assert_eq!(Louvain::default().partition(&g), Louvain::default().partition(&g));
    }
}
