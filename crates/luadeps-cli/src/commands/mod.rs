//! Command implementations for the luadeps CLI.
//!
//! - [`analyze`] - Discover and print the dependency tree
//! - [`manifest`] - Print the dependency-ordered file list
//! - [`build`] - Compile a standalone executable with luastatic
//! - [`env`] - Report available build tools
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod analyze;
pub mod build;
pub mod env;
pub mod manifest;
pub(crate) mod utils;

pub use analyze::execute as analyze_execute;
pub use build::execute as build_execute;
pub use env::execute as env_execute;
pub use manifest::execute as manifest_execute;
