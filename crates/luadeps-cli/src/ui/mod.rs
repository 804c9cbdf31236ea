//! Terminal output helpers.
//!
//! Status messages go to stderr; data (manifests, trees, JSON) is printed to
//! stdout by the commands themselves.

mod format;
mod messages;

pub use format::{format_duration, print_analysis_summary, tool_status_line};
pub use messages::{info, success, warning};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Initialize color support.
///
/// `--no-color` or an unattended stderr turns styling off globally.
pub fn init_colors(no_color: bool) {
    if no_color || !should_use_color() {
        owo_colors::set_override(false);
    }
}
