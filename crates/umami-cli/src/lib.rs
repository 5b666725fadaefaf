//! Umami CLI - ingredient co-occurrence graphs and recommendations.
//!
//! This crate is the command-line front end of `umami-graph`. It loads the
//! recipe corpus named by the configuration, builds (or loads from cache)
//! the co-occurrence graph and answers recommendation and inspection
//! queries against it.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`config`] - `umami.config.json` + `UMAMI_*` environment merging
//! - [`commands`] - One module per subcommand
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Status messages, summaries and progress bars
//!
//! Results are written to stdout. Status lines, progress and logs go to
//! stderr so that `umami recommend` output can be piped.
//!
//! # Example
//!
//! ```rust
//! use umami_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // Command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, QueryError, Result, ResultExt};
