//! Read-only diagnostics over a [`CooccurrenceGraph`].
//!
//! None of these sit on the recommendation path. Absent nodes and
//! disconnected pairs yield empty or `None` results rather than errors.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::CooccurrenceGraph;
use crate::Ingredient;

/// A shortest path between two ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientPath {
    /// Tokens from source to target, both inclusive.
    pub path: Vec<Ingredient>,
    /// Number of edges traversed (path length - 1).
    pub hops: usize,
}

impl IngredientPath {
    pub fn new(path: Vec<Ingredient>) -> Self {
        let hops = path.len().saturating_sub(1);
        Self { path, hops }
    }

    pub fn source(&self) -> Option<&Ingredient> {
        self.path.first()
    }

    pub fn target(&self) -> Option<&Ingredient> {
        self.path.last()
    }

    /// Example: "beef -> rice -> egg"
    pub fn format_path(&self) -> String {
        self.path
            .iter()
            .map(Ingredient::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// An ingredient with its degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedIngredient {
    pub ingredient: Ingredient,
    pub degree: usize,
}

/// One connected component with its best-connected members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Position in size order, starting at 0 for the largest component.
    pub index: usize,
    pub size: usize,
    /// Top members by degree inside the component.
    pub top_ingredients: Vec<RankedIngredient>,
}

impl CooccurrenceGraph {
    /// Ingredients adjacent to both `a` and `b`, in token order.
    pub fn common_neighbors(&self, a: &str, b: &str) -> Vec<&Ingredient> {
        if !self.contains(a) || !self.contains(b) {
            return Vec::new();
        }
        let other = self.neighbor_set(b);
        let mut common: Vec<_> = self
            .neighbor_set(a)
            .into_iter()
            .filter(|node| other.contains(node))
            .collect();
        common.sort();
        common
    }

    /// The `top_n` nodes with the highest degree; ties in token order.
    pub fn most_common(&self, top_n: usize) -> Vec<RankedIngredient> {
        let mut ranked: Vec<_> = self
            .nodes()
            .into_iter()
            .map(|node| RankedIngredient {
                ingredient: node.clone(),
                degree: self.degree(node.as_str()).unwrap_or(0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.degree
                .cmp(&a.degree)
                .then_with(|| a.ingredient.cmp(&b.ingredient))
        });
        ranked.truncate(top_n);
        ranked
    }

    /// Breadth-first shortest path by hop count.
    ///
    /// Returns `None` if either endpoint is absent or the two lie in
    /// different components. Neighbours are expanded in token order, so the
    /// chosen path is stable when several shortest paths exist.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<IngredientPath> {
        let start = self.adjacency.get_key_value(from)?.0;
        let goal = self.adjacency.get_key_value(to)?.0;
        if start == goal {
            return Some(IngredientPath::new(vec![start.clone()]));
        }

        let mut parent: FxHashMap<&Ingredient, &Ingredient> = FxHashMap::default();
        let mut visited: FxHashSet<&Ingredient> = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current.as_str()) {
                if !visited.insert(neighbor) {
                    continue;
                }
                parent.insert(neighbor, current);
                if neighbor == goal {
                    let mut path = vec![goal.clone()];
                    let mut cursor = goal;
                    while let Some(&previous) = parent.get(cursor) {
                        path.push(previous.clone());
                        cursor = previous;
                    }
                    path.reverse();
                    return Some(IngredientPath::new(path));
                }
                queue.push_back(neighbor);
            }
        }
        None
    }

    /// Connected components, largest first, each sorted by token.
    ///
    /// Components of equal size are ordered by their first token.
    pub fn connected_components(&self) -> Vec<Vec<&Ingredient>> {
        let mut visited: FxHashSet<&Ingredient> = FxHashSet::default();
        let mut components = Vec::new();

        for node in self.nodes() {
            if !visited.insert(node) {
                continue;
            }
            let mut component = vec![node];
            let mut stack = vec![node];
            while let Some(current) = stack.pop() {
                for (neighbor, _) in self.weighted_neighbors(current.as_str()) {
                    if visited.insert(neighbor) {
                        component.push(neighbor);
                        stack.push(neighbor);
                    }
                }
            }
            component.sort();
            components.push(component);
        }

        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(b[0])));
        components
    }

    /// Per component: its size and its `top_n` members by degree within the
    /// component's induced subgraph.
    pub fn analyze_clusters(&self, top_n: usize) -> Vec<ClusterSummary> {
        self.connected_components()
            .into_iter()
            .enumerate()
            .map(|(index, members)| ClusterSummary {
                index,
                size: members.len(),
                top_ingredients: self.induced_subgraph(members).most_common(top_n),
            })
            .collect()
    }

    /// The seeds together with all their neighbours, as an induced subgraph.
    /// Absent seeds are ignored.
    pub fn neighborhood<S: AsRef<str>>(&self, seeds: &[S]) -> CooccurrenceGraph {
        let mut keep: FxHashSet<&Ingredient> = FxHashSet::default();
        for seed in seeds {
            let Some((node, neighbors)) = self.adjacency.get_key_value(seed.as_ref()) else {
                continue;
            };
            keep.insert(node);
            keep.extend(neighbors.keys());
        }
        self.induced_subgraph(keep)
    }
}
