use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::DependencyGraph;

/// The ordered file list handed to the build step.
///
/// `modules` lists every dependency exactly once, each after all of its own
/// dependencies. The entry is kept apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub entry: PathBuf,
    pub modules: Vec<PathBuf>,
}

impl Manifest {
    /// Post-order walk from the entry, visiting dependencies in recorded order.
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let entry = graph.entry();
        let mut visited: FxHashSet<&Path> = FxHashSet::default();
        let mut modules = Vec::with_capacity(graph.dependency_count());
        let mut stack: Vec<(&Path, usize)> = vec![(entry, 0)];
        visited.insert(entry);

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let next = graph.dependencies(node).get(top.1);
            top.1 += 1;

            match next {
                Some(dep) => {
                    if visited.insert(dep.as_path()) {
                        stack.push((dep.as_path(), 0));
                    }
                }
                None => {
                    stack.pop();
                    if node != entry {
                        modules.push(node.to_path_buf());
                    }
                }
            }
        }

        Self {
            entry: entry.to_path_buf(),
            modules,
        }
    }

    /// Manual-mode manifest: no discovery, no file-system access.
    pub fn manual(entry: impl AsRef<Path>) -> Self {
        Self {
            entry: entry.as_ref().clean(),
            modules: Vec::new(),
        }
    }

    /// Entry first, then the dependencies in order.
    pub fn build_inputs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.entry.as_path()).chain(self.modules.iter().map(PathBuf::as_path))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.modules.iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
