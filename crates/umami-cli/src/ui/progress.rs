//! Progress bar for recipe ingestion.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use umami_graph::{BuildObserver, BuildReport};

/// Progress bar driven by the graph pipeline.
///
/// Hidden when stderr is not attended, in CI, or in quiet mode. Cleared on
/// drop if the build stops early.
///
/// # Examples
///
/// ```no_run
/// use umami_cli::ui::IngestProgress;
/// use umami_graph::BuildObserver;
///
/// let progress = IngestProgress::new(false);
/// progress.loading_started(100);
/// progress.recipe_loaded(50, 100);
/// ```
pub struct IngestProgress {
    bar: ProgressBar,
}

impl IngestProgress {
    /// Create a progress bar. `quiet` forces it hidden.
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet || !Self::should_show() {
            ProgressBar::hidden()
        } else {
            ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        Self { bar }
    }

    /// Returns `false` in CI environments or when stderr is not a TTY.
    pub fn should_show() -> bool {
        console::user_attended_stderr() && !super::is_ci()
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl BuildObserver for IngestProgress {
    fn loading_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message("reading recipes");
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn recipe_loaded(&self, loaded: usize, _total: usize) {
        self.bar.set_position(loaded as u64);
    }

    fn graph_built(&self, report: &BuildReport) {
        tracing::debug!(
            recipes = report.recipes_processed,
            dropped = report.ingredients_dropped,
            "ingestion finished"
        );
        self.bar.finish_and_clear();
    }
}

impl Drop for IngestProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_progress_is_hidden() {
        let progress = IngestProgress::new(true);
        assert!(progress.is_hidden());
    }

    #[test]
    fn test_observer_tracks_position() {
        let progress = IngestProgress::new(true);
        progress.loading_started(10);
        progress.recipe_loaded(4, 10);
        assert_eq!(progress.position(), 4);
        progress.graph_built(&BuildReport::default());
    }
}
