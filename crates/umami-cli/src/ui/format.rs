//! Formatting utilities for counts, durations and graph summaries.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;
use umami_graph::{GraphStatistics, PipelineOutput, SnapshotOrigin};

use super::colors_enabled;

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use umami_cli::ui::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(10_000), "10,000");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Elapsed time for status lines: `ms` under a second, seconds with one
/// decimal under a minute, then whole minutes and seconds.
///
/// ```
/// use std::time::Duration;
/// use umami_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1540)), "1.5s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        0 => format!("{}ms", elapsed.subsec_millis()),
        1..=59 => format!("{:.1}s", elapsed.as_secs_f64()),
        secs => format!("{}m {}s", secs / 60, secs % 60),
    }
}

fn origin_label(origin: SnapshotOrigin) -> &'static str {
    match origin {
        SnapshotOrigin::GraphCache => "graph cache",
        SnapshotOrigin::RecipeCache => "recipe cache",
        SnapshotOrigin::Source => "recipe source",
    }
}

/// Lines of the build summary, without styling.
pub(crate) fn summary_rows(
    output: &PipelineOutput,
    stats: &GraphStatistics,
) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Cache key", output.key.to_string()),
        ("Loaded from", origin_label(output.origin).to_string()),
        ("Ingredients", format_count(stats.node_count as u64)),
        ("Pairings", format_count(stats.edge_count as u64)),
        ("Total weight", format_count(stats.total_weight)),
        ("Isolated", format_count(stats.isolated_nodes as u64)),
        ("Max degree", format_count(stats.max_degree as u64)),
        ("Components", format_count(stats.component_count as u64)),
        ("Density", format!("{:.4}", stats.density)),
    ];
    if output.origin != SnapshotOrigin::GraphCache {
        let report = &output.report;
        rows.push(("Recipes read", format_count(report.recipes_processed as u64)));
        rows.push(("Dropped", format_count(report.ingredients_dropped as u64)));
    }
    rows
}

/// Print the graph summary table to stdout.
pub fn print_graph_summary(output: &PipelineOutput, elapsed: Duration) {
    let stats = output.snapshot.graph.statistics();
    let width = (Term::stdout().size().1 as usize).min(60);
    let rule = "─".repeat(width);
    let colored = colors_enabled();

    if colored {
        println!("\n{}", "Graph Summary".bold().underline());
    } else {
        println!("\nGraph Summary");
    }
    println!("{}", rule);

    for (label, value) in summary_rows(output, &stats) {
        if colored {
            println!("  {} {:<14} {}", "▸".blue(), label, value.bright_white().bold());
        } else {
            println!("  ▸ {:<14} {}", label, value);
        }
    }

    println!("{}", rule);
    if colored {
        println!("  {} {}", "Done in".bold(), format_duration(elapsed).green());
    } else {
        println!("  Done in {}", format_duration(elapsed));
    }
}
