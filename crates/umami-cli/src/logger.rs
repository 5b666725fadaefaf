//! Logging setup for the umami CLI.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a compact
//! formatter writing to stderr, so that command results on stdout stay
//! machine-readable.
//!
//! ```rust,no_run
//! use umami_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Loading recipes");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "umami=debug,umami_graph=debug,umami_cli=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "umami=error,umami_graph=error,umami_cli=error";

/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "umami=info,umami_graph=info,umami_cli=info";

/// Pick the filter directives for the given flags.
///
/// Order: `--verbose`, then `--quiet`, then `RUST_LOG`, then the default.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber for the given global flags.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Like [`init_logger`] with explicit directives. A second call is a no-op.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        tracing::debug!(%err, "keeping the already installed subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global and can be installed once per process, so
    // these tests only exercise filter construction.

    #[test]
    fn test_filter_directives_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let filter = filter_for(true, true);
        assert!(filter.to_string().to_lowercase().contains("umami_graph=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().to_lowercase().contains("umami_cli=error"));
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(false, true, true);
        init_logger(false, true, true);
    }
}
