//! `luadeps analyze`: discovery with a tree view on stdout.

use std::path::Path;
use std::time::Instant;

use luadeps_graph::{Analyzer, render_tree};

use crate::cli::AnalyzeArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the analyze command.
///
/// The tree goes to stdout, the summary to stderr.
pub fn execute(args: AnalyzeArgs, config: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let cwd = utils::get_cwd()?;
    let options = utils::load_options(config, &cwd, &args.discovery, false)?;
    let entry = utils::resolve_path(&args.entry, &cwd);

    let analysis = Analyzer::new(options).analyze(&entry)?;

    print!("{}", render_tree(&analysis.graph));
    ui::print_analysis_summary(&analysis, start.elapsed());
    Ok(())
}
