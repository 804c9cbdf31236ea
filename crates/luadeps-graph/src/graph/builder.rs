//! Depth-first discovery from an entry file.
//!
//! The traversal keeps its own stack of open files instead of recursing, so
//! depth is bounded by heap rather than call-stack size, and the open path is
//! available verbatim when a cycle has to be reported.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::DependencyGraph;
use crate::chain::DependencyChain;
use crate::error::{DiscoveryError, Result};
use crate::resolver::ModuleResolver;
use crate::runtime::Runtime;
use crate::scanner::{Reference, scan_references};
use crate::source::SourceText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the open path.
    Visiting,
    Done,
}

/// A file whose references are being walked.
struct Frame {
    path: PathBuf,
    references: std::vec::IntoIter<Reference>,
    dependencies: Vec<PathBuf>,
    seen: FxHashSet<PathBuf>,
}

/// Builds the [`DependencyGraph`] for one entry file.
pub struct GraphBuilder<'a> {
    runtime: &'a dyn Runtime,
    resolver: &'a ModuleResolver,
    max_dependencies: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(runtime: &'a dyn Runtime, resolver: &'a ModuleResolver, max_dependencies: usize) -> Self {
        Self {
            runtime,
            resolver,
            max_dependencies,
        }
    }

    /// Discover everything reachable from `entry`.
    ///
    /// `entry` must already be absolute and normalized; every node in the
    /// returned graph is identified by the path the resolver produced.
    pub fn build(&self, entry: &Path) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new(entry);
        let mut states: FxHashMap<PathBuf, VisitState> = FxHashMap::default();
        let mut stack = vec![self.open(entry)?];
        states.insert(entry.to_path_buf(), VisitState::Visiting);

        while let Some(frame) = stack.last_mut() {
            let Some(reference) = frame.references.next() else {
                if let Some(done) = stack.pop() {
                    debug!(
                        file = %done.path.display(),
                        dependencies = done.dependencies.len(),
                        "finished module"
                    );
                    states.insert(done.path.clone(), VisitState::Done);
                    graph.insert(done.path, done.dependencies);
                }
                continue;
            };

            let dependency = self.resolver.resolve(&reference.specifier, &frame.path)?;
            if !frame.seen.insert(dependency.clone()) {
                continue;
            }
            frame.dependencies.push(dependency.clone());

            match states.get(&dependency) {
                Some(VisitState::Done) => {}
                Some(VisitState::Visiting) => {
                    return Err(DiscoveryError::CircularDependency {
                        chain: cycle_chain(&stack, dependency),
                    });
                }
                None => {
                    let child = self.open(&dependency)?;
                    states.insert(dependency, VisitState::Visiting);
                    stack.push(child);
                }
            }
        }

        let count = graph.dependency_count();
        if count > self.max_dependencies {
            return Err(DiscoveryError::DependencyLimitExceeded {
                count,
                limit: self.max_dependencies,
            });
        }

        Ok(graph)
    }

    fn open(&self, path: &Path) -> Result<Frame> {
        let source = SourceText::load(self.runtime, path)?;
        let references = scan_references(&source.text, path)?;
        debug!(file = %path.display(), references = references.len(), "scanned module");

        Ok(Frame {
            path: path.to_path_buf(),
            references: references.into_iter(),
            dependencies: Vec::new(),
            seen: FxHashSet::default(),
        })
    }
}

/// Open path from the first occurrence of `repeated` through the current
/// file, closed by `repeated` again.
fn cycle_chain(stack: &[Frame], repeated: PathBuf) -> DependencyChain {
    let start = stack
        .iter()
        .position(|frame| frame.path == repeated)
        .unwrap_or(0);
    let mut path: Vec<PathBuf> = stack[start..].iter().map(|frame| frame.path.clone()).collect();
    path.push(repeated);
    DependencyChain::new(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SearchPaths;
    use crate::runtime::NativeRuntime;
    use crate::test_utils::create_lua_project;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn build(root: &Path, entry: &str, max: usize) -> Result<DependencyGraph> {
        let resolver = ModuleResolver::new(
            Arc::new(NativeRuntime),
            SearchPaths::from_dirs([root.to_path_buf()]),
        );
        GraphBuilder::new(&NativeRuntime, &resolver, max).build(&root.join(entry))
    }

    #[test]
    fn test_edges_are_deduplicated_per_file() {
        let temp = TempDir::new().unwrap();
        let root = create_lua_project(
            temp.path(),
            &[
                ("main.lua", "require('a')\nrequire('b')\nrequire('a')"),
                ("a.lua", "return {}"),
                ("b.lua", "require('a')"),
            ],
        );

        let graph = build(&root, "main.lua", 10).unwrap();
        assert_eq!(
            graph.dependencies(&root.join("main.lua")),
            &[root.join("a.lua"), root.join("b.lua")]
        );
        assert_eq!(graph.dependencies(&root.join("b.lua")), &[root.join("a.lua")]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_self_cycle() {
        let temp = TempDir::new().unwrap();
        let root = create_lua_project(temp.path(), &[("main.lua", "require('main')")]);

        match build(&root, "main.lua", 10).unwrap_err() {
            DiscoveryError::CircularDependency { chain } => {
                assert_eq!(chain.path, vec![root.join("main.lua"), root.join("main.lua")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cycle_chain_starts_at_first_occurrence() {
        let temp = TempDir::new().unwrap();
        let root = create_lua_project(
            temp.path(),
            &[
                ("main.lua", "require('a')"),
                ("a.lua", "require('b')"),
                ("b.lua", "require('c')"),
                ("c.lua", "require('a')"),
            ],
        );

        match build(&root, "main.lua", 10).unwrap_err() {
            DiscoveryError::CircularDependency { chain } => {
                assert_eq!(
                    chain.path,
                    vec![
                        root.join("a.lua"),
                        root.join("b.lua"),
                        root.join("c.lua"),
                        root.join("a.lua"),
                    ]
                );
                assert!(chain.has_cycle());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_limit_checked_after_full_traversal() {
        let temp = TempDir::new().unwrap();
        let root = create_lua_project(
            temp.path(),
            &[
                ("main.lua", "require('a') require('b') require('c')"),
                ("a.lua", ""),
                ("b.lua", ""),
                ("c.lua", ""),
            ],
        );

        assert!(build(&root, "main.lua", 3).is_ok());
        match build(&root, "main.lua", 1).unwrap_err() {
            DiscoveryError::DependencyLimitExceeded { count, limit } => {
                assert_eq!(count, 3);
                assert_eq!(limit, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        let depth = 2_000;
        let mut files: Vec<(String, String)> = (0..depth)
            .map(|i| (format!("m{i}.lua"), format!("require('m{}')", i + 1)))
            .collect();
        files.push((format!("m{depth}.lua"), "return {}".to_string()));
        let files: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let root = create_lua_project(temp.path(), &files);

        let graph = build(&root, "m0.lua", depth).unwrap();
        assert_eq!(graph.dependency_count(), depth);
        let manifest = graph.manifest();
        assert_eq!(manifest.modules.first(), Some(&root.join(format!("m{depth}.lua"))));
        assert_eq!(manifest.modules.last(), Some(&root.join("m1.lua")));
    }

    #[test]
    fn test_unresolved_reference_aborts() {
        let temp = TempDir::new().unwrap();
        let root = create_lua_project(temp.path(), &[("main.lua", "require('ghost')")]);
        let err = build(&root, "main.lua", 10).unwrap_err();
        assert!(matches!(err, DiscoveryError::ModuleNotFound { ref specifier, .. } if specifier == "ghost"));
    }
}
