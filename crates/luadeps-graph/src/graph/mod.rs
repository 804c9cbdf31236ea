//! The discovered dependency graph and what is derived from it.
//!
//! ```text
//!   entry ──▶ GraphBuilder ──▶ DependencyGraph ──┬──▶ Manifest (post-order)
//!              (scan, resolve,                   └──▶ render_tree
//!               cycle + limit checks)
//! ```

mod builder;
mod manifest;
mod tree;

pub use builder::GraphBuilder;
pub use manifest::Manifest;
pub use tree::render_tree;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chain::{DependencyChain, find_chain};

/// Module files keyed by absolute path, each with its direct dependencies.
///
/// Keys are kept in the order their files finished processing; each
/// dependency list is deduplicated and in first-seen source order. A
/// completed graph is acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    entry: PathBuf,
    modules: IndexMap<PathBuf, Vec<PathBuf>>,
}

impl DependencyGraph {
    /// An empty graph rooted at `entry`.
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            modules: IndexMap::new(),
        }
    }

    /// Record the final dependency list of `module`.
    pub(crate) fn insert(&mut self, module: PathBuf, dependencies: Vec<PathBuf>) {
        self.modules.insert(module, dependencies);
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    /// Direct dependencies of `module`, empty if it is not in the graph.
    pub fn dependencies(&self, module: &Path) -> &[PathBuf] {
        self.modules.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Modules that directly require `module`.
    pub fn dependents(&self, module: &Path) -> Vec<&Path> {
        self.modules
            .iter()
            .filter(|(_, deps)| deps.iter().any(|d| d == module))
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Every module, entry included, in completion order.
    pub fn modules(&self) -> impl Iterator<Item = &Path> {
        self.modules.keys().map(PathBuf::as_path)
    }

    pub fn contains(&self, module: &Path) -> bool {
        self.modules.contains_key(module)
    }

    /// Number of modules, entry included.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of discovered modules, entry excluded.
    pub fn dependency_count(&self) -> usize {
        self.modules.keys().filter(|m| **m != self.entry).count()
    }

    pub fn edge_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    /// Dependency-before-dependent order, entry excluded.
    pub fn manifest(&self) -> Manifest {
        Manifest::from_graph(self)
    }

    /// Shortest chain of requires leading from the entry to `module`.
    ///
    /// Answers "why is this file included". Returns `None` for modules not
    /// reachable from the entry.
    pub fn dependency_chain_to(&self, module: &Path) -> Option<DependencyChain> {
        find_chain(&self.entry, module, |node| self.dependencies(node))
    }

    /// Require depth of `module` below the entry (the entry itself is 0).
    pub fn depth_of(&self, module: &Path) -> Option<usize> {
        self.dependency_chain_to(module).map(|chain| chain.depth)
    }
}
