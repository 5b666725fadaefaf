//! Configuration for umami with multi-source loading.
//!
//! Merges settings from CLI args, environment variables and config files.
//! Priority: CLI > Environment (`UMAMI_*`) > `umami.config.json` > Defaults

mod conversions;
mod defaults;
mod loading;
mod tests;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use umami_graph::{DetectorKind, KeyStrategy, Strategy};

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX, env_field_name};
pub use types::*;

/// Umami configuration - loaded from umami.config.json, env and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UmamiConfig {
    /// JSON-lines recipe file
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Directory holding the graph cache database
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Number of recipes to ingest
    #[serde(default = "default_corpus_size")]
    pub corpus_size: usize,

    /// Default number of ingredients listed by ranking queries
    #[serde(default = "default_recommendations")]
    pub recommendations: usize,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default)]
    pub community: DetectorKind,

    #[serde(default)]
    pub cache_key: KeyStrategy,

    /// Skip cache reads (results are still cached)
    #[serde(default)]
    pub force_rebuild: bool,

    /// Raw ingredient name to canonical token
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Tokens dropped from every recipe
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for UmamiConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
