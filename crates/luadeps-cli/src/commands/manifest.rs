//! `luadeps manifest`: the ordered dependency list on stdout.

use std::io::{self, Write};
use std::path::Path;

use luadeps_graph::{Analyzer, Manifest};

use crate::cli::ManifestArgs;
use crate::commands::utils;
use crate::error::Result;

/// Execute the manifest command.
pub fn execute(args: ManifestArgs, config: Option<&Path>) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let options = utils::load_options(config, &cwd, &args.discovery, args.manual)?;
    let entry = utils::resolve_path(&args.entry, &cwd);

    let manifest = Analyzer::new(options).manifest(&entry)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_manifest(&mut out, &manifest, args.json)?;
    out.flush()?;
    Ok(())
}

/// One path per line, or a single JSON object.
fn write_manifest(out: &mut impl Write, manifest: &Manifest, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, manifest)?;
        writeln!(out)?;
    } else {
        for module in manifest {
            writeln!(out, "{}", module.display())?;
        }
    }
    Ok(())
}
