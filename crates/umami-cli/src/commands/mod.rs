//! Command implementations for the umami CLI.
//!
//! - [`build`] - Build or load the co-occurrence graph
//! - [`recommend`] - Seed-based recommendations
//! - [`inspect`] - Graph queries and export
//! - [`cache`] - Cache listing and clearing
//! - [`check`] - Configuration validation
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and the [`RunContext`] and returns a Result.

pub mod build;
pub mod cache;
pub mod check;
pub mod inspect;
pub mod recommend;
pub(crate) mod utils;

use std::path::Path;

pub use build::execute as build_execute;
pub use cache::execute as cache_execute;
pub use check::execute as check_execute;
pub use inspect::execute as inspect_execute;
pub use recommend::execute as recommend_execute;

/// Global options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunContext<'a> {
    /// Explicit `--config` path
    pub config_path: Option<&'a Path>,
    /// `--quiet` was given
    pub quiet: bool,
}
