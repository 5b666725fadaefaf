//! Corpus ingestion: recipes in, co-occurrence graph and weight map out.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{CooccurrenceGraph, EdgeWeights};
use crate::{Canonicalizer, Ingredient, IngredientPair, Recipe};

/// Counters collected while building a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub recipes_processed: usize,
    /// Ingredient lines that produced a token.
    pub ingredients_seen: usize,
    /// Ingredient lines the canonicalizer reported as unrepresentable.
    pub ingredients_dropped: usize,
    /// Lines whose token already appeared earlier in the same recipe.
    pub duplicate_ingredients: usize,
    pub pair_increments: u64,
}

/// Accumulates recipes into node and pair-weight sets.
///
/// Every ingredient line is passed through the canonicalizer. Lines it
/// rejects are dropped from node and edge formation and counted in
/// [`BuildReport::ingredients_dropped`]. A token repeated within one recipe
/// counts once, so a recipe with `k` distinct tokens contributes exactly
/// `k * (k - 1) / 2` pair increments.
pub struct GraphBuilder<'c, C: Canonicalizer + ?Sized> {
    canonicalizer: &'c C,
    nodes: FxHashSet<Ingredient>,
    weights: EdgeWeights,
    report: BuildReport,
}

impl<'c, C: Canonicalizer + ?Sized> GraphBuilder<'c, C> {
    pub fn new(canonicalizer: &'c C) -> Self {
        Self {
            canonicalizer,
            nodes: FxHashSet::default(),
            weights: EdgeWeights::new(),
            report: BuildReport::default(),
        }
    }

    /// Build a graph from a whole corpus in one call.
    pub fn build<'r, I>(canonicalizer: &'c C, recipes: I) -> (CooccurrenceGraph, EdgeWeights)
    where
        I: IntoIterator<Item = &'r Recipe>,
    {
        let mut builder = Self::new(canonicalizer);
        for recipe in recipes {
            builder.add_recipe(recipe);
        }
        builder.finish()
    }

    /// Fold one recipe into the accumulated state.
    pub fn add_recipe(&mut self, recipe: &Recipe) {
        let mut seen = FxHashSet::default();
        let mut tokens: Vec<Ingredient> = Vec::with_capacity(recipe.len());

        for line in recipe.ingredients() {
            match self.canonicalizer.canonicalize(&line.name) {
                Some(token) => {
                    self.report.ingredients_seen += 1;
                    if seen.insert(token.clone()) {
                        tokens.push(token);
                    } else {
                        self.report.duplicate_ingredients += 1;
                    }
                }
                None => {
                    self.report.ingredients_dropped += 1;
                    tracing::trace!(raw = %line.name, "dropped unrepresentable ingredient");
                }
            }
        }

        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                if let Some(pair) = IngredientPair::new(a.clone(), b.clone()) {
                    self.weights.increment(pair);
                    self.report.pair_increments += 1;
                }
            }
        }

        self.nodes.extend(tokens);
        self.report.recipes_processed += 1;
    }

    /// Counters so far.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Materialize edges from the accumulated weights.
    pub fn finish(self) -> (CooccurrenceGraph, EdgeWeights) {
        let (graph, weights, _) = self.finish_with_report();
        (graph, weights)
    }

    pub fn finish_with_report(self) -> (CooccurrenceGraph, EdgeWeights, BuildReport) {
        let graph = CooccurrenceGraph::from_weights(self.nodes, &self.weights);

        if self.report.ingredients_dropped > 0 {
            tracing::warn!(
                dropped = self.report.ingredients_dropped,
                seen = self.report.ingredients_seen,
                "some ingredients could not be canonicalized and were left out of the graph"
            );
        }
        tracing::debug!(
            recipes = self.report.recipes_processed,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph materialized"
        );

        (graph, self.weights, self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StandardCanonicalizer;

    fn identity(raw: &str) -> Option<Ingredient> {
        Ingredient::new(raw)
    }

    #[test]
    fn test_single_recipe_forms_triangle() {
        let recipes = vec![Recipe::from_pairs([("beef", "1"), ("rice", "1"), ("onion", "1")])];
        let (graph, weights) = GraphBuilder::build(&identity, &recipes);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.edges().iter().all(|(_, _, w)| *w == 1));
        assert_eq!(weights.len(), 3);
    }

    #[test]
    fn test_weights_count_recipes() {
        let recipes = vec![
            Recipe::from_names(["beef", "rice"]),
            Recipe::from_names(["beef", "rice", "onion"]),
        ];
        let (graph, _) = GraphBuilder::build(&identity, &recipes);

        assert_eq!(graph.weight("beef", "rice"), Some(2));
        assert_eq!(graph.weight("beef", "onion"), Some(1));
        assert_eq!(graph.weight("onion", "rice"), Some(1));
    }

    #[test]
    fn test_small_recipes_add_nodes_without_edges() {
        let recipes = vec![Recipe::from_names(["salt"]), Recipe::default()];
        let mut builder = GraphBuilder::new(&identity);
        for recipe in &recipes {
            builder.add_recipe(recipe);
        }
        let (graph, weights, report) = builder.finish_with_report();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(weights.is_empty());
        assert_eq!(report.recipes_processed, 2);
    }

    #[test]
    fn test_unrepresentable_ingredients_are_dropped() {
        let canonicalizer = StandardCanonicalizer::new().ignoring(["water"]);
        let recipes = vec![Recipe::from_names(["Beef", "water", "(optional)", "Rice"])];

        let mut builder = GraphBuilder::new(&canonicalizer);
        builder.add_recipe(&recipes[0]);
        let (graph, _, report) = builder.finish_with_report();

        assert_eq!(report.ingredients_dropped, 2);
        assert_eq!(report.ingredients_seen, 2);
        assert!(!graph.contains("water"));
        assert_eq!(graph.weight("beef", "rice"), Some(1));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_repeated_token_in_recipe_counts_once() {
        let recipes = vec![Recipe::from_names(["Beef", "beef (thinly sliced)", "rice"])];
        let canonicalizer = StandardCanonicalizer::new();

        let mut builder = GraphBuilder::new(&canonicalizer);
        builder.add_recipe(&recipes[0]);
        let (graph, _, report) = builder.finish_with_report();

        assert_eq!(report.duplicate_ingredients, 1);
        assert_eq!(report.pair_increments, 1);
        assert_eq!(graph.weight("beef", "rice"), Some(1));
    }
}
