//! Dependency chains: ordered paths of module files.
//!
//! A chain is used in two places: the cycle reported by
//! [`DiscoveryError::CircularDependency`](crate::DiscoveryError) and the
//! "why is this file included" answer of
//! [`DependencyGraph::dependency_chain_to`](crate::DependencyGraph::dependency_chain_to).

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A chain of module files, each one requiring the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyChain {
    /// The files from first to last
    pub path: Vec<PathBuf>,
    /// Depth of this chain (path length - 1)
    pub depth: usize,
}

impl DependencyChain {
    /// Create a new dependency chain from a path.
    pub fn new(path: Vec<PathBuf>) -> Self {
        let depth = path.len().saturating_sub(1);
        Self { path, depth }
    }

    /// The first file in the chain.
    pub fn entry_point(&self) -> Option<&Path> {
        self.path.first().map(PathBuf::as_path)
    }

    /// The last file in the chain.
    pub fn target(&self) -> Option<&Path> {
        self.path.last().map(PathBuf::as_path)
    }

    /// Check if this chain contains a cycle (same file appears twice).
    pub fn has_cycle(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.path.iter().any(|p| !seen.insert(p))
    }

    /// Format the chain as a human-readable string.
    ///
    /// Example: "/p/main.lua -> /p/utils.lua -> /p/main.lua"
    pub fn format_chain(&self) -> String {
        self.path
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Find the shortest chain from `entry` to `target` using BFS.
///
/// Dependencies are explored in their recorded order, so among chains of
/// equal length the one through the earliest-discovered edges wins.
pub(crate) fn find_chain<'a, F>(entry: &Path, target: &Path, get_dependencies: F) -> Option<DependencyChain>
where
    F: Fn(&Path) -> &'a [PathBuf],
{
    let mut queue: VecDeque<Vec<PathBuf>> = VecDeque::new();
    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();

    queue.push_back(vec![entry.to_path_buf()]);
    visited.insert(entry.to_path_buf());

    while let Some(current) = queue.pop_front() {
        let Some(last) = current.last() else {
            continue;
        };

        if last == target {
            return Some(DependencyChain::new(current));
        }

        for dep in get_dependencies(last) {
            if visited.insert(dep.clone()) {
                let mut next = current.clone();
                next.push(dep.clone());
                queue.push_back(next);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/project/{name}.lua"))
    }

    #[test]
    fn test_dependency_chain_creation() {
        let path = vec![p("main"), p("utils"), p("target")];
        let chain = DependencyChain::new(path.clone());

        assert_eq!(chain.depth, 2);
        assert_eq!(chain.entry_point(), Some(path[0].as_path()));
        assert_eq!(chain.target(), Some(path[2].as_path()));
        assert!(!chain.has_cycle());
    }

    #[test]
    fn test_self_cycle_is_detected() {
        let chain = DependencyChain::new(vec![p("a"), p("a")]);
        assert!(chain.has_cycle());
        assert_eq!(chain.depth, 1);
    }

    #[test]
    fn test_format_chain() {
        let chain = DependencyChain::new(vec![p("a"), p("b"), p("a")]);
        assert_eq!(
            chain.format_chain(),
            "/project/a.lua -> /project/b.lua -> /project/a.lua"
        );
    }

    #[test]
    fn test_empty_chain_depth() {
        let chain = DependencyChain::new(vec![]);
        assert_eq!(chain.depth, 0);
        assert!(chain.entry_point().is_none());
    }

    #[test]
    fn test_find_chain_prefers_shortest_path() {
        // main -> a -> b -> target
        // main -> c -> target
        let mut edges: FxHashMap<PathBuf, Vec<PathBuf>> = FxHashMap::default();
        edges.insert(p("main"), vec![p("a"), p("c")]);
        edges.insert(p("a"), vec![p("b")]);
        edges.insert(p("b"), vec![p("target")]);
        edges.insert(p("c"), vec![p("target")]);

        let chain = find_chain(&p("main"), &p("target"), |node| {
            edges.get(node).map(Vec::as_slice).unwrap_or(&[])
        })
        .unwrap();

        assert_eq!(chain.path, vec![p("main"), p("c"), p("target")]);
    }

    #[test]
    fn test_find_chain_unreachable() {
        let edges: FxHashMap<PathBuf, Vec<PathBuf>> = FxHashMap::default();
        let chain = find_chain(&p("main"), &p("other"), |node| {
            edges.get(node).map(Vec::as_slice).unwrap_or(&[])
        });
        assert!(chain.is_none());
    }
}
