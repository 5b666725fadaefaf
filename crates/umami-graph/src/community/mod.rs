//! Community detection.
//!
//! A [`CommunityDetector`] turns a graph into a [`Partition`]: disjoint
//! communities covering every node. Two detectors are provided:
//!
//! - [`GreedyModularity`] - agglomerative merging by best modularity gain
//! - [`Louvain`] - multi-level local moving and aggregation
//!
//! Community ids carry no meaning across runs. They are assigned by size
//! (largest first) and then by first member, so a fixed input always yields
//! the same labels.

mod greedy;
mod louvain;

pub use greedy::GreedyModularity;
pub use louvain::Louvain;

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graph::queries::RankedIngredient;
use crate::{CooccurrenceGraph, Ingredient};

/// Label of one community within a [`Partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(pub usize);

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from every graph node to its community.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    assignment: FxHashMap<Ingredient, CommunityId>,
    communities: Vec<Vec<Ingredient>>,
}

impl Partition {
    /// Build a partition from member groups. Empty groups are discarded;
    /// groups must be disjoint.
    pub fn from_groups(groups: Vec<Vec<Ingredient>>) -> Self {
        let mut communities: Vec<Vec<Ingredient>> = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|mut group| {
                group.sort();
                group
            })
            .collect();
        communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

        let mut assignment = FxHashMap::default();
        for (id, members) in communities.iter().enumerate() {
            for member in members {
                assignment.insert(member.clone(), CommunityId(id));
            }
        }

        Self {
            assignment,
            communities,
        }
    }

    /// Every node of `graph` in its own community.
    pub fn singletons(graph: &CooccurrenceGraph) -> Self {
        Self::from_groups(graph.nodes().into_iter().map(|n| vec![n.clone()]).collect())
    }

    pub fn community_of(&self, node: &str) -> Option<CommunityId> {
        self.assignment.get(node).copied()
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Number of assigned nodes.
    pub fn node_count(&self) -> usize {
        self.assignment.len()
    }

    /// Communities in id order, members sorted by token.
    pub fn communities(&self) -> &[Vec<Ingredient>] {
        &self.communities
    }

    pub fn members(&self, id: CommunityId) -> Option<&[Ingredient]> {
        self.communities.get(id.0).map(Vec::as_slice)
    }

    /// Per community: size and the `top_n` members by degree inside the
    /// community's induced subgraph.
    pub fn summaries(&self, graph: &CooccurrenceGraph, top_n: usize) -> Vec<CommunitySummary> {
        self.communities
            .iter()
            .enumerate()
            .map(|(id, members)| CommunitySummary {
                id: CommunityId(id),
                size: members.len(),
                top_ingredients: graph.induced_subgraph(members).most_common(top_n),
            })
            .collect()
    }
}

/// Size and best-connected members of one community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySummary {
    pub id: CommunityId,
    pub size: usize,
    pub top_ingredients: Vec<RankedIngredient>,
}

/// Partitions a graph into communities.
pub trait CommunityDetector {
    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;

    /// Partition every node of `graph`. Nodes without edges end up in
    /// singleton communities.
    fn partition(&self, graph: &CooccurrenceGraph) -> Partition;
}

/// Selectable detector implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    #[default]
    Greedy,
    Louvain,
}

impl DetectorKind {
    /// The detector with its default settings.
    pub fn detector(self) -> Box<dyn CommunityDetector> {
        match self {
            DetectorKind::Greedy => Box::new(GreedyModularity::default()),
            DetectorKind::Louvain => Box::new(Louvain::default()),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::Greedy => write!(f, "greedy"),
            DetectorKind::Louvain => write!(f, "louvain"),
        }
    }
}

/// Modularity of `partition` over `graph`:
/// `Q = sum_c [ L_c / m - (d_c / 2m)^2 ]`, with `L_c` the edge mass inside
/// community `c`, `d_c` its total degree and `m` the total edge mass.
///
/// With `weighted` false every edge counts as 1. Nodes missing from the
/// partition are treated as singletons. Returns 0 for a graph without edges.
pub fn modularity(graph: &CooccurrenceGraph, partition: &Partition, weighted: bool) -> f64 {
    let mass = |w: u32| if weighted { f64::from(w) } else { 1.0 };

    let mut m = 0.0;
    let mut internal: FxHashMap<CommunityId, f64> = FxHashMap::default();
    for (a, b, weight) in graph.edges() {
        let w = mass(weight);
        m += w;
        if let (Some(ca), Some(cb)) = (
            partition.community_of(a.as_str()),
            partition.community_of(b.as_str()),
        ) {
            if ca == cb {
                *internal.entry(ca).or_insert(0.0) += w;
            }
        }
    }
    if m == 0.0 {
        return 0.0;
    }

    let mut degree_sums: FxHashMap<CommunityId, f64> = FxHashMap::default();
    let mut unassigned = 0.0;
    for node in graph.nodes() {
        let degree: f64 = graph
            .weighted_neighbors(node.as_str())
            .map(|(_, w)| mass(w))
            .sum();
        match partition.community_of(node.as_str()) {
            Some(id) => *degree_sums.entry(id).or_insert(0.0) += degree,
            None => unassigned += (degree / (2.0 * m)).powi(2),
        }
    }

    let inside: f64 = internal.values().sum::<f64>() / m;
    let expected: f64 = degree_sums
        .values()
        .map(|d| (d / (2.0 * m)).powi(2))
        .sum::<f64>()
        + unassigned;
    inside - expected
}
