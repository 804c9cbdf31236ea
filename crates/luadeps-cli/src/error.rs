//! Error handling for the luadeps CLI.
//!
//! - [`CliError`] is what every command returns
//! - [`ConfigError`] and [`BuildError`] carry the CLI's own failure modes
//! - discovery failures are wrapped unchanged from [`DiscoveryError`]
//!
//! Messages end with a `Hint:` line where there is something the user can do.

use std::path::PathBuf;

use luadeps_graph::DiscoveryError;
use thiserror::Error;

mod miette;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Dependency discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External build errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a luadeps.toml file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Errors from the external luastatic build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required tool is not on PATH
    #[error("{tool} not found on PATH\n\nHint: {hint}")]
    ToolNotFound {
        tool: String,
        hint: String,
    },

    /// The tool ran and exited unsuccessfully
    #[error("Compilation failed: `{command}` exited with {status}\n{stderr}")]
    CompilationFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The tool reported success but the executable is missing
    #[error("Expected output was not produced: {}\n\nHint: Run with --verbose to see the luastatic output", .0.display())]
    OutputNotFound(PathBuf),

    /// A manual-mode dependency doesn't exist
    #[error("Dependency not found: {}\n\nHint: Check the --require paths", .0.display())]
    DependencyNotFound(PathBuf),

    /// Output directory is not usable
    #[error("Output directory is not writable: {}\n\nHint: Check directory permissions or choose another --output", .0.display())]
    OutputNotWritable(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
