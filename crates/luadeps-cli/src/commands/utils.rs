//! Helpers shared by the command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use luadeps_graph::DiscoveryOptions;

use crate::cli::DiscoveryArgs;
use crate::config::{self, Overrides};
use crate::error::{BuildError, CliError, Result};

/// Current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::InvalidArgument(format!("Failed to get current working directory: {e}"))
    })
}

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load discovery options with command-line flags as the top layer.
pub fn load_options(
    config_path: Option<&Path>,
    cwd: &Path,
    discovery: &DiscoveryArgs,
    manual: bool,
) -> Result<DiscoveryOptions> {
    config::load(config_path, cwd, &Overrides::from_args(discovery, manual))
}

/// Ensure an output directory exists, creating it if necessary.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        fs::create_dir_all(out_dir).map_err(|_| BuildError::OutputNotWritable(out_dir.to_path_buf()))?;
    } else if !out_dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Output path exists but is not a directory: {}",
            out_dir.display()
        )));
    }

    Ok(())
}
