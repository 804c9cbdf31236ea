//! Command-line interface definition for luadeps.
//!
//! # Command Structure
//!
//! - `luadeps analyze` - Discover dependencies and print the tree
//! - `luadeps manifest` - Print the dependency-ordered file list
//! - `luadeps build` - Compile a standalone executable with luastatic
//! - `luadeps env` - Report which build tools are installed

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{AnalyzeArgs, BuildArgs, Command, DiscoveryArgs, ManifestArgs};

/// luadeps - static dependency discovery for Lua scripts
#[derive(Parser, Debug)]
#[command(
    name = "luadeps",
    version,
    about = "Static dependency discovery for Lua scripts",
    long_about = "luadeps follows every statically known require() of a Lua entry script,\n\
                  resolves each module to a file and prints the dependency-ordered file list\n\
                  that luastatic needs to build a standalone executable."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every scanned file, resolved module and search directory.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a luadeps.toml configuration file
    ///
    /// Defaults to ./luadeps.toml when it exists.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_manifest() {
        let cli = Cli::parse_from(["luadeps", "manifest", "main.lua", "--json", "--max-deps", "5"]);
        match cli.command {
            Command::Manifest(args) => {
                assert_eq!(args.entry, PathBuf::from("main.lua"));
                assert!(args.json);
                assert_eq!(args.discovery.max_deps, Some(5));
                assert!(!args.manual);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["luadeps", "analyze", "main.lua", "--verbose", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["luadeps", "-v", "-q", "env"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_requires_need_manual() {
        let result = Cli::try_parse_from(["luadeps", "build", "main.lua", "--require", "a.lua"]);
        assert!(result.is_err());

        let cli = Cli::parse_from([
            "luadeps", "build", "main.lua", "--manual", "--require", "a.lua", "--require", "b.lua",
            "-o", "out/app",
        ]);
        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.requires, vec![PathBuf::from("a.lua"), PathBuf::from("b.lua")]);
                assert_eq!(args.output, Some(PathBuf::from("out/app")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
