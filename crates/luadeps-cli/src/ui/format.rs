//! Formatting for summaries and status tables.

use std::path::Path;
use std::time::Duration;

use console::Term;
use luadeps_graph::Analysis;
use owo_colors::{OwoColorize, Stream::Stderr};

/// Format a duration as `50ms`, `1.50s` or `1m 30s`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print module, edge and search-directory counts to stderr.
pub fn print_analysis_summary(analysis: &Analysis, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(60);

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {}",
        "Dependencies:".if_supports_color(Stderr, |t| t.bold()),
        analysis.manifest.len()
    );
    eprintln!("  Requires:     {}", analysis.graph.edge_count());
    eprintln!("  Search dirs:  {}", analysis.search_paths.len());
    eprintln!(
        "  Time:         {}",
        format_duration(elapsed).if_supports_color(Stderr, |t| t.green())
    );
}

/// One line of the `env` report, without color.
pub fn tool_status_line(tool: &str, location: Option<&Path>) -> String {
    match location {
        Some(path) => format!("✓ {tool} ({})", path.display()),
        None => format!("✗ {tool} (not found)"),
    }
}
