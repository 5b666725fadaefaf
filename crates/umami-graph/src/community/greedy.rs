//! Greedy modularity agglomeration (Clauset-Newman-Moore).
//!
//! Starts from singleton communities and repeatedly merges the pair of
//! adjacent communities whose union raises modularity the most, stopping
//! once no merge has a positive gain. Merge candidates live in a max-heap
//! that is invalidated lazily through per-community version counters.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use super::{CommunityDetector, Partition};
use crate::{CooccurrenceGraph, Ingredient};

/// Greedy modularity maximization.
///
/// Unweighted by default: every co-occurrence edge counts once regardless of
/// how many recipes share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyModularity {
    pub weighted: bool,
}

impl GreedyModularity {
    pub fn weighted() -> Self {
        Self { weighted: true }
    }
}

#[derive(Debug)]
struct MergeCandidate {
    gain: f64,
    low: usize,
    high: usize,
    low_version: u32,
    high_version: u32,
}

impl PartialEq for MergeCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MergeCandidate {}

impl Ord for MergeCandidate {
    // Highest gain first; on equal gain the lower community indices win.
    fn cmp(&self, other: &Self) -> Ordering {
        self.gain
            .total_cmp(&other.gain)
            .then_with(|| other.low.cmp(&self.low))
            .then_with(|| other.high.cmp(&self.high))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Agglomeration {
    /// `e[i][j]`: fraction of edge ends joining communities `i` and `j`.
    links: Vec<FxHashMap<usize, f64>>,
    /// `a[i]`: fraction of edge ends attached to community `i`.
    ends: Vec<f64>,
    members: Vec<Vec<usize>>,
    alive: Vec<bool>,
    version: Vec<u32>,
    heap: BinaryHeap<MergeCandidate>,
}

impl Agglomeration {
    fn new(nodes: &[&Ingredient], graph: &CooccurrenceGraph, weighted: bool) -> Option<Self> {
        let index: FxHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.as_str(), i))
            .collect();
        let mass = |w: u32| if weighted { f64::from(w) } else { 1.0 };

        let total: f64 = graph.edges().iter().map(|(_, _, w)| mass(*w)).sum();
        if total == 0.0 {
            return None;
        }
        let two_m = 2.0 * total;

        let n = nodes.len();
        let mut links = vec![FxHashMap::default(); n];
        let mut ends = vec![0.0; n];
        for (a, b, weight) in graph.edges() {
            let (i, j) = (index[a.as_str()], index[b.as_str()]);
            let share = mass(weight) / two_m;
            links[i].insert(j, share);
            links[j].insert(i, share);
            ends[i] += share;
            ends[j] += share;
        }

        let mut state = Self {
            links,
            ends,
            members: (0..n).map(|i| vec![i]).collect(),
            alive: vec![true; n],
            version: vec![0; n],
            heap: BinaryHeap::new(),
        };
        for i in 0..n {
            let mut neighbors: Vec<usize> = state.links[i].keys().copied().filter(|&j| i < j).collect();
            neighbors.sort_unstable();
            for j in neighbors {
                state.push_candidate(i, j);
            }
        }
        Some(state)
    }

    fn gain(&self, i: usize, j: usize) -> f64 {
        let e_ij = self.links[i].get(&j).copied().unwrap_or(0.0);
        2.0 * (e_ij - self.ends[i] * self.ends[j])
    }

    fn push_candidate(&mut self, i: usize, j: usize) {
        let (low, high) = if i < j { (i, j) } else { (j, i) };
        self.heap.push(MergeCandidate {
            gain: self.gain(low, high),
            low,
            high,
            low_version: self.version[low],
            high_version: self.version[high],
        });
    }

    fn is_current(&self, candidate: &MergeCandidate) -> bool {
        self.alive[candidate.low]
            && self.alive[candidate.high]
            && self.version[candidate.low] == candidate.low_version
            && self.version[candidate.high] == candidate.high_version
    }

    /// Fold `absorbed` into `keep`.
    fn merge(&mut self, keep: usize, absorbed: usize) {
        let absorbed_links = std::mem::take(&mut self.links[absorbed]);
        for (k, share) in absorbed_links {
            if k == keep {
                continue;
            }
            *self.links[keep].entry(k).or_insert(0.0) += share;
            let back = &mut self.links[k];
            back.remove(&absorbed);
            *back.entry(keep).or_insert(0.0) += share;
        }
        self.links[keep].remove(&absorbed);

        self.ends[keep] += self.ends[absorbed];
        self.ends[absorbed] = 0.0;

        let moved = std::mem::take(&mut self.members[absorbed]);
        self.members[keep].extend(moved);

        self.alive[absorbed] = false;
        self.version[keep] += 1;
        self.version[absorbed] += 1;

        let mut neighbors: Vec<usize> = self.links[keep].keys().copied().collect();
        neighbors.sort_unstable();
        for k in neighbors {
            self.push_candidate(keep, k);
        }
    }

    fn run(&mut self) -> usize {
        let mut merges = 0;
        while let Some(candidate) = self.heap.pop() {
            if !self.is_current(&candidate) {
                continue;
            }
            if candidate.gain <= 0.0 {
                break;
            }
            self.merge(candidate.low, candidate.high);
            merges += 1;
        }
        merges
    }
}

impl CommunityDetector for GreedyModularity {
    fn name(&self) -> &'static str {
        "greedy-modularity"
    }

    fn partition(&self, graph: &CooccurrenceGraph) -> Partition {
        let nodes = graph.nodes();
        let Some(mut state) = Agglomeration::new(&nodes, graph, self.weighted) else {
            return Partition::singletons(graph);
        };

        let merges = state.run();

        let groups: Vec<Vec<Ingredient>> = state
            .members
            .iter()
            .zip(&state.alive)
            .filter(|(_, alive)| **alive)
            .map(|(members, _)| members.iter().map(|&i| nodes[i].clone()).collect())
            .collect();
        let partition = Partition::from_groups(groups);

        tracing::debug!(
            detector = self.name(),
            merges,
            communities = partition.len(),
            "partitioned graph"
        );
        partition
    }
}
