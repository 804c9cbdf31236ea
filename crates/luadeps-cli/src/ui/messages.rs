//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream::Stderr, Style};

/// Print a success message to stderr.
pub fn success(message: &str) {
    let mark = Style::new().green().bold();
    eprintln!("{} {}", "✓".if_supports_color(Stderr, |t| t.style(mark)), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    let mark = Style::new().blue().bold();
    eprintln!("{} {}", "ℹ".if_supports_color(Stderr, |t| t.style(mark)), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    let mark = Style::new().yellow().bold();
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |t| t.style(mark)),
        message.if_supports_color(Stderr, |t| t.yellow())
    );
}
