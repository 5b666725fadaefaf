use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_corpus_size;

/// Available umami subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the co-occurrence graph, or load it from the cache
    ///
    /// Reads the first N recipes of the source, builds the weighted graph and
    /// stores both in the cache. Prints graph statistics.
    Build(BuildArgs),

    /// Recommend ingredients for a comma-separated list of seeds
    ///
    /// Prints a JSON array holding the seeds followed by the recommendations.
    ///
    /// Examples:
    ///   umami recommend beef,rice 5
    ///   umami recommend "soy sauce,mirin" 3 --strategy cooccurring
    Recommend(RecommendArgs),

    /// Query the graph: neighbours, paths, rankings, clusters, export
    Inspect(InspectArgs),

    /// Manage the graph cache
    Cache(CacheArgs),

    /// Validate configuration and check that the recipe source exists
    Check(CheckArgs),
}

/// Options selecting which corpus the graph is built from
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Number of recipes to ingest (also the cache key)
    #[arg(long = "recipes", value_name = "N", value_parser = parse_corpus_size)]
    pub recipes: Option<usize>,

    /// JSON-lines recipe file
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// How cache keys are derived
    #[arg(long = "cache-key", value_enum)]
    pub cache_key: Option<CacheKeyArg>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Ignore cached entries and rebuild (the result is still cached)
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the recommend command
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Seed ingredients, comma separated
    #[arg(value_name = "SEEDS")]
    pub seeds: String,

    /// Number of recommendations
    #[arg(value_name = "COUNT")]
    pub count: usize,

    /// Ranking strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Community detection algorithm
    #[arg(long, value_enum)]
    pub community: Option<CommunityArg>,

    /// Print scores alongside the ingredients
    #[arg(long)]
    pub scores: bool,

    #[command(flatten)]
    pub corpus: CorpusArgs,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(subcommand)]
    pub query: InspectQuery,
}

/// Graph queries
#[derive(Subcommand, Debug)]
pub enum InspectQuery {
    /// Ingredients adjacent to both A and B
    Neighbors {
        #[arg(value_name = "A")]
        first: String,
        #[arg(value_name = "B")]
        second: String,
    },

    /// Shortest path between two ingredients
    Path {
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
    },

    /// Subgraph of the seed ingredients and everything adjacent to them
    Neighborhood {
        /// Comma-separated ingredients
        #[arg(value_name = "SEEDS")]
        seeds: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Most connected ingredients
    Top {
        /// How many to list (default: `recommendations` from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Connected components with their best-connected members
    Clusters {
        /// Members listed per cluster
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Communities found by the configured detector
    Communities {
        /// Members listed per community
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Community detection algorithm
        #[arg(long, value_enum)]
        community: Option<CommunityArg>,
    },

    /// Node, edge and weight statistics
    Stats,

    /// Export the graph for external renderers
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Arguments for the cache command
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache maintenance actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// List cached graph and recipe entries
    List,
    /// Remove every cached entry
    Clear,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}
