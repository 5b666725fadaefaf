//! Command-line interface definition for umami.
//!
//! # Command Structure
//!
//! - `umami build` - Build or load the co-occurrence graph
//! - `umami recommend` - Recommend ingredients for a set of seeds
//! - `umami inspect` - Query utilities over the graph
//! - `umami cache` - List or clear cached graphs
//! - `umami check` - Validate configuration and the recipe source

mod commands;
pub mod enums;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{
    BuildArgs, CacheAction, CacheArgs, CheckArgs, Command, CorpusArgs, InspectArgs, InspectQuery,
    RecommendArgs,
};
pub use enums::*;
pub use validation::{parse_corpus_size, split_seeds};

/// Umami - ingredient co-occurrence graphs and recommendations
#[derive(Parser, Debug)]
#[command(
    name = "umami",
    version,
    about = "Ingredient co-occurrence graphs and recommendations",
    long_about = "Umami builds a weighted graph of which ingredients appear together in a recipe\n\
                  corpus, caches it, and recommends ingredients that fit a set of seeds."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a configuration file (default: ./umami.config.json if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
