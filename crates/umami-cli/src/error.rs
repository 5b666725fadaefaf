//! Error types for the `umami` binary.
//!
//! Every command returns [`CliError`]. Configuration mistakes, bad queries
//! and failures from `umami-graph` all convert into it with `?`, and the
//! variants a user can act on carry a `Hint:` line.
//!
//! ```rust,no_run
//! use umami_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_recipes(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass --source <path> to point at a JSON-lines file")
//! }
//! ```

mod report;

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use report::{cli_error_to_miette, graph_error_to_miette};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Query(#[from] QueryError),

    /// Graph construction, cache and recipe source failures
    #[error("{0}")]
    Graph(#[from] umami_graph::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// A message already decorated by [`ResultExt`]
    #[error("{0}")]
    Custom(String),
}

impl From<umami_graph::CacheError> for CliError {
    fn from(err: umami_graph::CacheError) -> Self {
        CliError::Graph(err.into())
    }
}

/// Problems with `umami.config.json`, `UMAMI_*` variables or their merge.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create an umami.config.json file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Errors in a query that the user can correct.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No seed ingredients given\n\nHint: Pass a comma-separated list such as 'beef,rice'")]
    EmptySeeds,

    #[error("Recipe source not found: {}\n\nHint: Set 'source' in umami.config.json or pass --source <path>", .0.display())]
    SourceNotFound(PathBuf),

    /// The source ran out before the requested corpus size
    #[error("Requested {requested} recipes but the source only has {available}\n\nHint: Lower --recipes or 'corpusSize' to at most {available}")]
    CorpusTooSmall { requested: usize, available: usize },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Decorates any error convertible into [`CliError`].
pub trait ResultExt<T> {
    /// Report a missing file as [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;

    fn with_hint(self, hint: impl Display) -> Result<T>;

    /// Prefix the message, `"<msg>: <error>"`.
    fn context(self, msg: impl Display) -> Result<T>;
}

fn is_missing_file(err: &CliError) -> bool {
    match err {
        CliError::Io(e) | CliError::Graph(umami_graph::Error::Io(e)) => {
            e.kind() == io::ErrorKind::NotFound
        }
        _ => false,
    }
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            if is_missing_file(&err) {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            } else {
                err
            }
        })
    }

    fn with_hint(self, hint: impl Display) -> Result<T> {
        self.map_err(|e| CliError::Custom(format!("{}\n\nHint: {hint}", e.into())))
    }

    fn context(self, msg: impl Display) -> Result<T> {
        self.map_err(|e| CliError::Custom(format!("{msg}: {}", e.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_names_the_file_and_hints() {
        let msg = ConfigError::NotFound(PathBuf::from("umami.config.json")).to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("umami.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn invalid_value_mentions_field_and_hint() {
        let msg = ConfigError::InvalidValue {
            field: "corpusSize".to_string(),
            value: "0".to_string(),
            hint: "Must be at least 1".to_string(),
        }
        .to_string();
        assert!(msg.contains("Invalid value for 'corpusSize'"));
        assert!(msg.contains("Must be at least 1"));
    }

    #[test]
    fn short_corpus_suggests_the_available_size() {
        let msg = QueryError::CorpusTooSmall {
            requested: 100,
            available: 7,
        }
        .to_string();
        assert!(msg.contains("Requested 100 recipes"));
        assert!(msg.contains("at most 7"));
    }

    #[test]
    fn missing_source_points_at_the_flag() {
        let msg = QueryError::SourceNotFound(PathBuf::from("recipes.jsonl")).to_string();
        assert!(msg.contains("recipes.jsonl"));
        assert!(msg.contains("--source"));
    }

    #[test]
    fn domain_errors_convert_into_cli_error() {
        let err: CliError = ConfigError::NotFound(PathBuf::from("x.json")).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = QueryError::EmptySeeds.into();
        assert!(matches!(err, CliError::Query(_)));

        let err: CliError = umami_graph::CacheError::CacheMiss.into();
        assert!(matches!(err, CliError::Graph(umami_graph::Error::Cache(_))));
    }

    #[test]
    fn with_path_rewrites_not_found() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("recipes.jsonl").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));

        let result: umami_graph::Result<()> =
            Err(umami_graph::Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone")));
        let err = result.with_path("recipes.jsonl").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn with_path_keeps_other_errors() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        let err = result.with_path("recipes.jsonl").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn hint_and_context_decorate_the_message() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));
        let err = result.with_hint("Try creating the file").unwrap_err();
        assert!(err.to_string().contains("Hint: Try creating the file"));

        let result: std::result::Result<(), QueryError> = Err(QueryError::EmptySeeds);
        let msg = result.context("Failed to recommend").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to recommend: "));
        assert!(msg.contains("No seed ingredients"));
    }
}
