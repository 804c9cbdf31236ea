use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available luadeps subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover dependencies and print them as a tree
    Analyze(AnalyzeArgs),

    /// Print the dependency-ordered file list
    ///
    /// One absolute path per line, every module after the modules it
    /// requires. The entry script itself is not listed.
    Manifest(ManifestArgs),

    /// Build a standalone executable with luastatic
    ///
    /// Runs `luastatic <entry> <dependencies...>` in the output directory.
    Build(BuildArgs),

    /// Report which build tools are available on PATH
    Env,
}

/// Options shared by every command that runs discovery.
#[derive(Args, Debug, Clone, Default)]
pub struct DiscoveryArgs {
    /// Maximum number of dependencies (entry excluded)
    #[arg(long, value_name = "N")]
    pub max_deps: Option<usize>,

    /// Do not ask luarocks for extra search directories
    #[arg(long)]
    pub no_luarocks: bool,
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Entry Lua script
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,
}

/// Arguments for the manifest command
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Entry Lua script
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Skip discovery and print an empty manifest
    #[arg(long)]
    pub manual: bool,

    /// Print `{ "entry": ..., "modules": [...] }` instead of plain lines
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Entry Lua script
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    /// Output executable path
    ///
    /// Defaults to the entry's file stem in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Skip discovery; only the files given with --require are bundled
    #[arg(long)]
    pub manual: bool,

    /// Dependency to bundle in manual mode (repeatable, in order)
    #[arg(long = "require", value_name = "FILE", requires = "manual")]
    pub requires: Vec<PathBuf>,
}
