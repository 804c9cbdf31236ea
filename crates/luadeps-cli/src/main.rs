//! luadeps - static dependency discovery for Lua scripts.
//!
//! Parses arguments, sets up logging and colors, and dispatches to a command.

use clap::Parser;
use luadeps_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args, config),
        cli::Command::Manifest(manifest_args) => commands::manifest_execute(manifest_args, config),
        cli::Command::Build(build_args) => commands::build_execute(build_args, config),
        cli::Command::Env => commands::env_execute(),
    };

    result.map_err(error::cli_error_to_miette)
}
