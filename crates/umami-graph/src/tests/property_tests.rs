//! Property-based tests for umami-graph using proptest.
//!
//! Corpora are generated over a small token alphabet so that recipes share
//! ingredients and the resulting graphs have real structure.

use proptest::prelude::*;

use super::fixtures::{build, identity};
use crate::{
    CentralityMeasure, CooccurrenceGraph, DegreeCentrality, EdgeWeights, GraphBuilder, Recipe,
    RecommendationEngine,
};

/// Token names drawn from a short alphabet.
fn token_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

/// Recipes of 0-8 lines; duplicate names within a recipe are allowed.
fn recipe_strategy() -> impl Strategy<Value = Recipe> {
    prop::collection::vec(token_strategy(), 0..=8).prop_map(Recipe::from_names)
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Recipe>> {
    prop::collection::vec(recipe_strategy(), 0..=20)
}

fn distinct_tokens(recipe: &Recipe) -> usize {
    let mut names: Vec<&str> = recipe.ingredients().iter().map(|l| l.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: a recipe with k distinct tokens adds exactly C(k,2) increments.
    #[test]
    fn prop_pair_increments_are_binomial(recipe in recipe_strategy()) {
        let mut builder = GraphBuilder::new(&identity);
        builder.add_recipe(&recipe);
        let (graph, weights, report) = builder.finish_with_report();

        let k = distinct_tokens(&recipe) as u64;
        let expected = k * k.saturating_sub(1) / 2;
        prop_assert_eq!(report.pair_increments, expected);
        prop_assert_eq!(weights.total_increments(), expected);
        prop_assert_eq!(graph.node_count() as u64, k);
    }

    /// Property: the graph is well formed and mirrors the weight map.
    #[test]
    fn prop_graph_matches_weights(corpus in corpus_strategy()) {
        let (graph, weights) = build(&corpus);

        prop_assert!(graph.check_invariants().is_ok());
        prop_assert_eq!(graph.edge_weights(), weights.clone());
        prop_assert_eq!(graph.edge_count(), weights.len());
        for (_, _, weight) in graph.edges() {
            prop_assert!(weight >= 1);
            prop_assert!(weight as usize <= corpus.len());
        }
    }

    /// Property: building twice yields identical graphs.
    #[test]
    fn prop_build_is_idempotent(corpus in corpus_strategy()) {
        let (first, first_weights) = build(&corpus);
        let (second, second_weights) = build(&corpus);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_weights, second_weights);
    }

    /// Property: weights built from two halves and merged equal the weights of
    /// the whole corpus, in either merge order.
    #[test]
    fn prop_merge_matches_sequential_build(corpus in corpus_strategy(), split in 0usize..=20) {
        let split = split.min(corpus.len());
        let (_, whole) = build(&corpus);
        let (_, left) = build(&corpus[..split]);
        let (_, right) = build(&corpus[split..]);

        let mut left_first: EdgeWeights = left.clone();
        left_first.merge(&right);
        let mut right_first: EdgeWeights = right;
        right_first.merge(&left);

        prop_assert_eq!(&left_first, &whole);
        prop_assert_eq!(&right_first, &whole);
    }

    /// Property: degree centrality lies in [0, 1].
    #[test]
    fn prop_centrality_is_bounded(corpus in corpus_strategy()) {
        let (graph, _) = build(&corpus);
        let centrality = DegreeCentrality.compute(&graph);

        prop_assert_eq!(centrality.len(), graph.node_count());
        for node in graph.nodes() {
            let score = centrality.score_or(node.as_str(), -1.0);
            prop_assert!((0.0..=1.0).contains(&score), "{} scored {}", node, score);
        }
    }

    /// Property: neither strategy ever returns a seed, present or not.
    #[test]
    fn prop_seeds_are_never_recommended(
        corpus in corpus_strategy(),
        seeds in prop::collection::vec(token_strategy(), 1..=4),
        count in 0usize..=10,
    ) {
        let (graph, _) = build(&corpus);
        let engine = RecommendationEngine::new(&graph);

        let adjacency = engine.recommend(&seeds, count).unwrap();
        let cooccurring = engine.recommend_cooccurring(&seeds, count).unwrap();

        for result in [&adjacency, &cooccurring] {
            prop_assert!(result.len() <= count);
            for ingredient in result {
                prop_assert!(!seeds.iter().any(|s| s == ingredient.as_str()));
                prop_assert!(graph.contains(ingredient.as_str()));
            }
        }
    }

    /// Property: every node lands in exactly one community.
    #[test]
    fn prop_partition_covers_graph(corpus in corpus_strategy()) {
        let (graph, _) = build(&corpus);
        let engine = RecommendationEngine::new(&graph);
        let partition = engine.partition();

        prop_assert_eq!(partition.node_count(), graph.node_count());
        let members: usize = partition.communities().iter().map(Vec::len).sum();
        prop_assert_eq!(members, graph.node_count());
    }
}

#[test]
fn test_single_isolated_node_has_zero_centrality() {
    let mut graph = CooccurrenceGraph::new();
    graph.add_node(crate::Ingredient::new("salt").unwrap());

    assert_eq!(DegreeCentrality.compute(&graph).get("salt"), Some(0.0));
}
