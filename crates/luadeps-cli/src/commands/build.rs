//! `luadeps build`: compile a standalone executable with luastatic.
//!
//! luastatic is run in the output directory with the entry first and the
//! dependencies after it, in manifest order. It writes an executable named
//! after the entry's stem; when `--output` names something else the result
//! is renamed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use luadeps_graph::{Analyzer, DiscoveryError, Manifest};
use tracing::debug;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{BuildError, Result};
use crate::ui;

pub(crate) const LUASTATIC: &str = "luastatic";
pub(crate) const C_COMPILER: &str = "gcc";

/// Execute the build command.
///
/// # Build Process
///
/// 1. Check that luastatic and a C compiler are on PATH
/// 2. Load configuration (flags > env > file > defaults)
/// 3. Discover the manifest, or take the `--require` list in manual mode
/// 4. Run luastatic in the output directory
/// 5. Verify the executable exists
pub fn execute(args: BuildArgs, config: Option<&Path>) -> Result<()> {
    let start = Instant::now();

    let luastatic = find_tool(LUASTATIC, "luarocks install luastatic")?;
    find_tool(C_COMPILER, "Install gcc (build-essential, gcc, or MinGW on Windows)")?;

    let cwd = utils::get_cwd()?;
    let options = utils::load_options(config, &cwd, &args.discovery, args.manual)?;
    let entry = utils::resolve_path(&args.entry, &cwd);

    let manifest = if options.manual {
        manual_manifest(&entry, &args.requires, &cwd)?
    } else {
        ui::info("Discovering dependencies...");
        let manifest = Analyzer::new(options).manifest(&entry)?;
        ui::info(&format!("Found {} dependencies", manifest.len()));
        manifest
    };

    let output = match &args.output {
        Some(path) => utils::resolve_path(path, &cwd),
        None => cwd.join(default_executable_name(&manifest.entry)),
    };
    let out_dir = output.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
    utils::ensure_output_dir(&out_dir)?;

    run_luastatic(&luastatic, &manifest, &out_dir)?;

    let produced = out_dir.join(default_executable_name(&manifest.entry));
    if produced != output && produced.is_file() {
        debug!(from = %produced.display(), to = %output.display(), "renaming executable");
        fs::rename(&produced, &output)?;
    }
    if !output.is_file() {
        return Err(BuildError::OutputNotFound(output).into());
    }

    ui::success(&format!(
        "Built {} in {}",
        output.display(),
        ui::format_duration(start.elapsed())
    ));
    Ok(())
}

fn find_tool(tool: &str, hint: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| {
        BuildError::ToolNotFound {
            tool: tool.to_string(),
            hint: hint.to_string(),
        }
        .into()
    })
}

/// Manifest from an explicit dependency list, kept in the given order.
fn manual_manifest(entry: &Path, requires: &[PathBuf], cwd: &Path) -> Result<Manifest> {
    if !entry.is_file() {
        return Err(DiscoveryError::EntryNotFound {
            path: entry.to_path_buf(),
        }
        .into());
    }

    let mut manifest = Manifest::manual(entry);
    for require in requires {
        let path = utils::resolve_path(require, cwd);
        if !path.is_file() {
            return Err(BuildError::DependencyNotFound(path).into());
        }
        manifest.modules.push(path);
    }
    Ok(manifest)
}

/// `<stem>` plus the platform executable suffix.
fn default_executable_name(entry: &Path) -> OsString {
    let mut name = entry.file_stem().map(OsString::from).unwrap_or_else(|| OsString::from("a"));
    name.push(std::env::consts::EXE_SUFFIX);
    name
}

fn run_luastatic(luastatic: &Path, manifest: &Manifest, out_dir: &Path) -> Result<()> {
    let inputs: Vec<&Path> = manifest.build_inputs().collect();
    let command_line = std::iter::once(LUASTATIC.to_string())
        .chain(inputs.iter().map(|p| p.display().to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %command_line, dir = %out_dir.display(), "running luastatic");

    let output = Command::new(luastatic)
        .args(&inputs)
        .current_dir(out_dir)
        .output()?;

    if !output.status.success() {
        return Err(BuildError::CompilationFailed {
            command: command_line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        }
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!(output = %stdout.trim_end(), "luastatic output");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;

    #[test]
    fn test_default_executable_name() {
        let name = default_executable_name(Path::new("/p/app/main.lua"));
        assert_eq!(name, OsString::from(format!("main{}", std::env::consts::EXE_SUFFIX)));
    }

    #[test]
    fn test_manual_manifest_keeps_order() {
        let temp = TempDir::new().unwrap();
        for name in ["main.lua", "b.lua", "a.lua"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let manifest = manual_manifest(
            &temp.path().join("main.lua"),
            &[PathBuf::from("b.lua"), PathBuf::from("a.lua")],
            temp.path(),
        )
        .unwrap();

        assert_eq!(manifest.modules, vec![temp.path().join("b.lua"), temp.path().join("a.lua")]);
    }

    #[test]
    fn test_manual_manifest_missing_dependency() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.lua"), "").unwrap();

        let err = manual_manifest(&temp.path().join("main.lua"), &[PathBuf::from("gone.lua")], temp.path())
            .unwrap_err();
        assert!(matches!(err, CliError::Build(BuildError::DependencyNotFound(_))));
    }

    #[test]
    fn test_manual_manifest_missing_entry() {
        let temp = TempDir::new().unwrap();
        let err = manual_manifest(&temp.path().join("main.lua"), &[], temp.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Discovery(DiscoveryError::EntryNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_luastatic_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::manual(temp.path().join("main.lua"));

        let err = run_luastatic(Path::new("false"), &manifest, temp.path()).unwrap_err();
        match err {
            CliError::Build(BuildError::CompilationFailed { command, .. }) => {
                assert!(command.starts_with("luastatic "));
                assert!(command.ends_with("main.lua"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
