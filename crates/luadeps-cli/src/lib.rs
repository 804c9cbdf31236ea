//! The `luadeps` command-line tool.
//!
//! A thin layer over [`luadeps_graph`]: argument parsing, layered
//! configuration, output formatting and the external luastatic build.
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - one module per subcommand
//! - [`config`] - `luadeps.toml`, `LUADEPS_*` and flag layering
//! - [`error`] - CLI errors and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and summaries on stderr

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result};
