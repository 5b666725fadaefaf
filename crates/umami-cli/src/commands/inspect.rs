//! Inspect command implementation: read-only queries over the graph.

use crate::cli::{ExportFormat, InspectArgs, InspectQuery, split_seeds};
use crate::commands::{RunContext, utils};
use crate::config::{ConfigOverrides, UmamiConfig};
use crate::error::{Result, ResultExt};
use crate::ui;
use std::path::Path;
use umami_graph::{Canonicalizer, CooccurrenceGraph, GraphStatistics};

/// Execute the inspect command.
///
/// Query results go to stdout as JSON (or DOT for `export --format dot`).
/// Unknown ingredients produce empty results rather than errors.
pub fn execute(args: InspectArgs, ctx: &RunContext<'_>) -> Result<()> {
    let config = utils::load_config(ctx, &ConfigOverrides::from(&args))?;
    let loaded = utils::load_graph(&config, ctx)?;
    let graph = &loaded.output.snapshot.graph;
    let canonicalizer = utils::canonicalizer(&config);

    let rendered = run_query(&args.query, graph, &config, &canonicalizer)?;

    match &args.query {
        InspectQuery::Export {
            output: Some(path), ..
        } => write_export(path, &rendered, ctx),
        _ => {
            println!("{}", rendered);
            Ok(())
        }
    }
}

/// Evaluate `query` and render its result.
pub fn run_query(
    query: &InspectQuery,
    graph: &CooccurrenceGraph,
    config: &UmamiConfig,
    canonicalizer: &dyn Canonicalizer,
) -> Result<String> {
    let token = |raw: &str| -> String {
        canonicalizer
            .canonicalize(raw)
            .map(|i| i.into_string())
            .unwrap_or_else(|| raw.trim().to_string())
    };

    let rendered = match query {
        InspectQuery::Neighbors { first, second } => {
            let common = graph.common_neighbors(&token(first), &token(second));
            serde_json::to_string_pretty(&common)?
        }
        InspectQuery::Path { from, to } => {
            let path = graph.shortest_path(&token(from), &token(to));
            if path.is_none() {
                tracing::info!(%from, %to, "no path between ingredients");
            }
            serde_json::to_string_pretty(&path)?
        }
        InspectQuery::Neighborhood { seeds, format } => {
            let seeds = utils::canonical_tokens(canonicalizer, &split_seeds(seeds));
            let sub = graph.neighborhood(&seeds);
            tracing::debug!(
                seeds = seeds.len(),
                nodes = sub.node_count(),
                "neighborhood extracted"
            );
            match format {
                ExportFormat::Json => sub.to_json()?,
                ExportFormat::Dot => sub.to_dot(),
            }
        }
        InspectQuery::Top { limit } => {
            let top = graph.most_common(limit.unwrap_or(config.recommendations));
            serde_json::to_string_pretty(&top)?
        }
        InspectQuery::Clusters { limit } => {
            let clusters = graph.analyze_clusters(limit.unwrap_or(config.recommendations));
            serde_json::to_string_pretty(&clusters)?
        }
        InspectQuery::Communities { limit, .. } => {
            let detector = config.community.detector();
            let partition = detector.partition(graph);
            tracing::debug!(
                detector = detector.name(),
                communities = partition.len(),
                "partition computed"
            );
            let summaries = partition.summaries(graph, limit.unwrap_or(config.recommendations));
            serde_json::to_string_pretty(&summaries)?
        }
        InspectQuery::Stats => {
            let stats: GraphStatistics = graph.statistics();
            serde_json::to_string_pretty(&stats)?
        }
        InspectQuery::Export { format, .. } => match format {
            ExportFormat::Json => graph.to_json()?,
            ExportFormat::Dot => graph.to_dot(),
        },
    };
    Ok(rendered)
}

fn write_export(path: &Path, rendered: &str, ctx: &RunContext<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent)?;
    }
    std::fs::write(path, rendered).with_path(path)?;
    if !ctx.quiet {
        ui::success(&format!("Graph exported to {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use umami_graph::{GraphBuilder, Recipe, StandardCanonicalizer};

    fn graph() -> CooccurrenceGraph {
        let recipes = vec![
            Recipe::from_names(["beef", "rice"]),
            Recipe::from_names(["beef", "rice", "onion"]),
            Recipe::from_names(["basil", "tomato"]),
        ];
        GraphBuilder::build(&StandardCanonicalizer::new(), &recipes).0
    }

    fn query(q: InspectQuery) -> serde_json::Value {
        let rendered = run_query(
            &q,
            &graph(),
            &UmamiConfig::default_config(),
            &StandardCanonicalizer::new(),
        )
        .unwrap();
        serde_json::from_str(&rendered).unwrap()
    }

    #[test]
    fn test_neighbors_canonicalizes_arguments() {
        let value = query(InspectQuery::Neighbors {
            first: "Beef".to_string(),
            second: " RICE ".to_string(),
        });
        assert_eq!(value, serde_json::json!(["onion"]));
    }

    #[test]
    fn test_path_between_components_is_null() {
        let value = query(InspectQuery::Path {
            from: "beef".to_string(),
            to: "basil".to_string(),
        });
        assert!(value.is_null());
    }

    #[test]
    fn test_path_within_component() {
        let value = query(InspectQuery::Path {
            from: "onion".to_string(),
            to: "rice".to_string(),
        });
        assert_eq!(value["path"], serde_json::json!(["onion", "rice"]));
        assert_eq!(value["hops"], 1);
    }

    #[test]
    fn test_neighborhood_keeps_seeds_and_their_neighbours() {
        let value = query(InspectQuery::Neighborhood {
            seeds: "Onion, saffron".to_string(),
            format: ExportFormat::Json,
        });
        let rendered = value.to_string();
        for token in ["onion", "beef", "rice"] {
            assert!(rendered.contains(&format!("\"{token}\"")), "{rendered}");
        }
        assert!(!rendered.contains("basil"));
        assert!(!rendered.contains("saffron"));
    }

    #[test]
    fn test_neighborhood_as_dot() {
        let rendered = run_query(
            &InspectQuery::Neighborhood {
                seeds: "basil".to_string(),
                format: ExportFormat::Dot,
            },
            &graph(),
            &UmamiConfig::default_config(),
            &StandardCanonicalizer::new(),
        )
        .unwrap();
        assert!(rendered.contains(r#""basil" -- "tomato" [weight=1];"#));
        assert!(!rendered.contains("beef"));
    }

    #[test]
    fn test_top_respects_limit() {
        let value = query(InspectQuery::Top { limit: Some(1) });
        let top = value.as_array().unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0]["ingredient"], "beef");
        assert_eq!(top[0]["degree"], 2);
    }

    #[test]
    fn test_clusters_and_communities() {
        let clusters = query(InspectQuery::Clusters { limit: None });
        assert_eq!(clusters.as_array().unwrap().len(), 2);
        assert_eq!(clusters[0]["size"], 3);

        let communities = query(InspectQuery::Communities {
            limit: Some(2),
            community: None,
        });
        assert_eq!(communities.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_stats() {
        let value = query(InspectQuery::Stats);
        assert_eq!(value["nodeCount"], 5);
        assert_eq!(value["edgeCount"], 4);
        assert_eq!(value["componentCount"], 2);
    }

    #[test]
    fn test_dot_export() {
        let rendered = run_query(
            &InspectQuery::Export {
                format: ExportFormat::Dot,
                output: None,
            },
            &graph(),
            &UmamiConfig::default_config(),
            &StandardCanonicalizer::new(),
        )
        .unwrap();
        assert!(rendered.starts_with("graph Cooccurrence {"));
        assert!(rendered.contains(r#""beef" -- "rice" [weight=2];"#));
    }
}
