//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use umami_graph::{CacheError, Error};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Graph(e) => graph_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert umami-graph Error to miette Report
pub fn graph_error_to_miette(err: Error) -> Report {
    match err {
        Error::Cache(
            e @ (CacheError::InvalidShape { .. }
            | CacheError::Corrupted(_)
            | CacheError::VersionMismatch { .. }
            | CacheError::Decode(_)),
        ) => {
            miette::miette!(
                "Unusable cache entry: {}\n\nHint: Run 'umami cache clear' or 'umami build --force'",
                e
            )
        }
        Error::Source(msg) => {
            miette::miette!(
                "Malformed recipe source: {}\n\nHint: Each line must hold one JSON recipe object",
                msg
            )
        }
        _ => miette::miette!("{}", err),
    }
}
