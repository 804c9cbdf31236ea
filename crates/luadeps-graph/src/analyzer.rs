//! One-call discovery: entry file in, graph and manifest out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tracing::{debug, info};

use crate::config::DiscoveryOptions;
use crate::error::{DiscoveryError, Result};
use crate::graph::{DependencyGraph, GraphBuilder, Manifest};
use crate::resolver::{CommandProbe, ModuleResolver, NoProbe, SearchPathProbe, SearchPaths};
use crate::runtime::{NativeRuntime, Runtime};

/// Everything a completed discovery pass produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: DependencyGraph,
    pub manifest: Manifest,
    pub search_paths: SearchPaths,
}

/// Runs discovery passes with fixed options.
///
/// Each call to [`analyze`](Self::analyze) is an independent pass with its
/// own traversal state.
#[derive(Debug, Clone)]
pub struct Analyzer {
    options: DiscoveryOptions,
    runtime: Arc<dyn Runtime>,
    probe: Arc<dyn SearchPathProbe>,
}

impl Analyzer {
    pub fn new(options: DiscoveryOptions) -> Self {
        let probe: Arc<dyn SearchPathProbe> = if options.probe.enabled {
            Arc::new(CommandProbe::from_options(&options.probe))
        } else {
            Arc::new(NoProbe)
        };

        Self {
            options,
            runtime: Arc::new(NativeRuntime),
            probe,
        }
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn SearchPathProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Run a full discovery pass from `entry`.
    ///
    /// Always walks the tree; `manual` only affects [`manifest`](Self::manifest).
    pub fn analyze(&self, entry: &Path) -> Result<Analysis> {
        let entry = self.absolute_entry(entry)?;
        let base_dir = entry.parent().unwrap_or(Path::new("")).to_path_buf();
        info!(entry = %entry.display(), "discovering dependencies");

        let search_paths =
            SearchPaths::discover(&base_dir, &self.options, self.runtime.as_ref(), self.probe.as_ref());
        let resolver = ModuleResolver::new(Arc::clone(&self.runtime), search_paths);
        let graph = GraphBuilder::new(self.runtime.as_ref(), &resolver, self.options.max_dependencies)
            .build(&entry)?;
        let manifest = graph.manifest();

        debug!(
            modules = manifest.len(),
            edges = graph.edge_count(),
            "discovery complete"
        );

        Ok(Analysis {
            graph,
            manifest,
            search_paths: resolver.search_paths().clone(),
        })
    }

    /// Manifest for `entry`, honoring manual mode.
    pub fn manifest(&self, entry: &Path) -> Result<Manifest> {
        if self.options.manual {
            debug!(entry = %entry.display(), "manual mode, skipping discovery");
            return Ok(Manifest::manual(entry));
        }
        self.analyze(entry).map(|analysis| analysis.manifest)
    }

    fn absolute_entry(&self, entry: &Path) -> Result<PathBuf> {
        let absolute = if entry.is_absolute() {
            entry.to_path_buf()
        } else {
            let cwd = self
                .runtime
                .current_dir()
                .map_err(|source| DiscoveryError::ReadFailed {
                    path: entry.to_path_buf(),
                    source,
                })?;
            cwd.join(entry)
        }
        .clean();

        if !self.runtime.is_file(&absolute) {
            return Err(DiscoveryError::EntryNotFound {
                path: entry.to_path_buf(),
            });
        }

        Ok(self.runtime.canonicalize(&absolute).unwrap_or(absolute))
    }
}

/// Discover the manifest for `entry` with the native runtime.
pub fn analyze_dependencies(entry: &Path, options: &DiscoveryOptions) -> Result<Manifest> {
    Analyzer::new(options.clone()).manifest(entry)
}
