//! Terminal output helpers: status lines, the graph summary and the ingest
//! progress bar.
//!
//! Status lines and progress go to stderr so stdout only ever carries
//! command results. Colors are decided once by [`init_colors`].
//!
//! ```no_run
//! use umami_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Loading recipes...");
//! ui::success("Graph built");
//! ```

mod format;
mod messages;
mod progress;

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_count, format_duration, print_graph_summary};
pub use messages::{error, info, success, warning};
pub use progress::IngestProgress;

static COLORS: AtomicBool = AtomicBool::new(false);

const CI_VARS: [&str; 5] = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"];

/// True under a CI runner, where progress bars are suppressed.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| env::var_os(var).is_some())
}

/// `NO_COLOR` beats `FORCE_COLOR`; otherwise color only for an attended stderr.
pub fn should_use_color() -> bool {
    match (env::var_os("NO_COLOR"), env::var_os("FORCE_COLOR")) {
        (Some(_), _) => false,
        (None, Some(_)) => true,
        (None, None) => console::user_attended_stderr(),
    }
}

/// Call once, early in `main`.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
