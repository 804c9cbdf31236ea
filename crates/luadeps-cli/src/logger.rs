//! Logging setup for the luadeps CLI.
//!
//! Log records go to stderr so stdout stays clean for manifests and JSON.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for the luadeps crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for the luadeps crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "luadeps=debug,luadeps_graph=debug,luadeps_cli=debug";
const QUIET_FILTER: &str = "luadeps=error,luadeps_graph=error,luadeps_cli=error";
const DEFAULT_FILTER: &str = "luadeps=info,luadeps_graph=info,luadeps_cli=info";

/// Build the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("luadeps_graph=debug"));
    }

    #[test]
    fn test_quiet_filter_is_errors_only() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("luadeps_cli=error"));
    }
}
