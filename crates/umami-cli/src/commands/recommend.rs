//! Recommend command implementation.

use crate::cli::{RecommendArgs, split_seeds};
use crate::commands::{RunContext, utils};
use crate::config::ConfigOverrides;
use crate::error::{QueryError, Result};
use crate::ui;
use serde::Serialize;
use umami_graph::{CooccurrenceGraph, DegreeCentrality, Recommendation, RecommendationEngine};

/// Scored output for `--scores`.
#[derive(Debug, Serialize)]
pub struct ScoredOutput<'a> {
    pub seeds: &'a [String],
    pub recommendations: &'a [Recommendation],
}

/// Execute the recommend command.
///
/// Prints a JSON array on stdout: the seeds (canonicalized) followed by the
/// recommended ingredients in rank order. With `--scores` prints an object
/// holding both lists and the score of each recommendation.
///
/// # Errors
///
/// [`QueryError::EmptySeeds`] when the seed list holds no ingredient, plus
/// everything graph loading can fail with.
pub fn execute(args: RecommendArgs, ctx: &RunContext<'_>) -> Result<()> {
    let raw_seeds = split_seeds(&args.seeds);
    if raw_seeds.is_empty() {
        return Err(QueryError::EmptySeeds.into());
    }

    let config = utils::load_config(ctx, &ConfigOverrides::from(&args))?;
    let loaded = utils::load_graph(&config, ctx)?;
    let graph = &loaded.output.snapshot.graph;

    let seeds = dedup(utils::canonical_tokens(
        &utils::canonicalizer(&config),
        &raw_seeds,
    ));
    if !ctx.quiet {
        warn_absent(graph, &seeds);
    }

    let detector = config.community.detector();
    let engine =
        RecommendationEngine::with_components(graph, detector.as_ref(), &DegreeCentrality);
    let recommendations = engine.recommend_with(config.strategy, &seeds, args.count)?;
    tracing::info!(
        seeds = seeds.len(),
        strategy = %config.strategy,
        returned = recommendations.len(),
        "recommendations ready"
    );

    println!("{}", render(&seeds, &recommendations, args.scores)?);
    Ok(())
}

/// Serialize the command output.
pub fn render(seeds: &[String], recommendations: &[Recommendation], scores: bool) -> Result<String> {
    let json = if scores {
        serde_json::to_string(&ScoredOutput {
            seeds,
            recommendations,
        })?
    } else {
        let tokens: Vec<&str> = seeds
            .iter()
            .map(String::as_str)
            .chain(recommendations.iter().map(|r| r.ingredient.as_str()))
            .collect();
        serde_json::to_string(&tokens)?
    };
    Ok(json)
}

fn dedup(tokens: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

fn warn_absent(graph: &CooccurrenceGraph, seeds: &[String]) {
    let absent: Vec<&str> = seeds
        .iter()
        .map(String::as_str)
        .filter(|seed| !graph.contains(seed))
        .collect();
    if !absent.is_empty() {
        ui::warning(&format!(
            "Not in the graph, ignored: {}",
            absent.join(", ")
        ));
    }
}
