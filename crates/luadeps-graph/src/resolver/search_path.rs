//! Ordered list of directories searched for dotted module names.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::probe::{SearchPathProbe, parse_search_path_output};
use crate::config::DiscoveryOptions;
use crate::runtime::Runtime;

/// Search directories in priority order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    /// Build the search list for a pass rooted at `base_dir`.
    ///
    /// Order: `base_dir`, then each configured local directory that exists
    /// under it, then whatever existing directories the probe reports.
    pub fn discover(
        base_dir: &Path,
        options: &DiscoveryOptions,
        runtime: &dyn Runtime,
        probe: &dyn SearchPathProbe,
    ) -> Self {
        let mut dirs = vec![base_dir.to_path_buf()];

        for name in &options.local_dirs {
            let dir = base_dir.join(name);
            if runtime.is_dir(&dir) {
                dirs.push(dir);
            }
        }

        if options.probe.enabled {
            dirs.extend(probed_dirs(options, runtime, probe));
        }

        let search_paths = Self::from_dirs(dirs);
        for dir in search_paths.iter() {
            debug!(dir = %dir.display(), "search directory");
        }
        search_paths
    }

    /// Wrap an explicit list, dropping later duplicates.
    pub fn from_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen = FxHashSet::default();
        let dirs = dirs
            .into_iter()
            .filter(|dir| seen.insert(dir.clone()))
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

fn probed_dirs(
    options: &DiscoveryOptions,
    runtime: &dyn Runtime,
    probe: &dyn SearchPathProbe,
) -> Vec<PathBuf> {
    let Some(output) = probe.query() else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = parse_search_path_output(&output)
        .into_iter()
        .filter(|dir| runtime.is_dir(dir))
        .map(|dir| runtime.canonicalize(&dir).unwrap_or(dir))
        .collect();

    let mut seen = FxHashSet::default();
    dirs.retain(|dir| seen.insert(dir.clone()));

    let max = options.probe.max_dirs;
    if dirs.len() > max {
        warn!(
            reported = dirs.len(),
            kept = max,
            "search-path probe reported too many directories, ignoring the rest"
        );
        dirs.truncate(max);
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::probe::NoProbe;
    use crate::runtime::NativeRuntime;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug)]
    struct FixedProbe(String);

    impl SearchPathProbe for FixedProbe {
        fn query(&self) -> Option<String> {
            Some(self.0.clone())
        }
    }

    fn base(temp: &TempDir) -> PathBuf {
        temp.path().canonicalize().unwrap()
    }

    #[test]
    fn test_base_dir_first_then_existing_local_dirs() {
        let temp = TempDir::new().unwrap();
        let base = base(&temp);
        fs::create_dir(base.join("src")).unwrap();
        fs::create_dir(base.join("lua_modules")).unwrap();

        let paths = SearchPaths::discover(&base, &DiscoveryOptions::default(), &NativeRuntime, &NoProbe);

        assert_eq!(
            paths.dirs(),
            &[base.clone(), base.join("lua_modules"), base.join("src")]
        );
    }

    #[test]
    fn test_probe_dirs_are_filtered_and_appended() {
        let temp = TempDir::new().unwrap();
        let base = base(&temp);
        let rocks = base.join("rocks");
        fs::create_dir(&rocks).unwrap();

        let output = format!(
            "{}/?.lua;{}/?/init.lua;{}/missing/?.lua",
            rocks.display(),
            rocks.display(),
            base.display()
        );
        let probe = FixedProbe(output);

        let paths = SearchPaths::discover(&base, &DiscoveryOptions::default(), &NativeRuntime, &probe);
        assert_eq!(paths.dirs(), &[base.clone(), rocks]);
    }

    #[test]
    fn test_disabled_probe_is_not_queried() {
        let temp = TempDir::new().unwrap();
        let base = base(&temp);
        let probe = FixedProbe(format!("{}/?.lua", base.join("elsewhere").display()));
        fs::create_dir(base.join("elsewhere")).unwrap();

        let options = DiscoveryOptions::default().without_probe();
        let paths = SearchPaths::discover(&base, &options, &NativeRuntime, &probe);
        assert_eq!(paths.dirs(), &[base]);
    }

    #[test]
    fn test_probe_contribution_is_capped() {
        let temp = TempDir::new().unwrap();
        let base = base(&temp);
        let mut entries = Vec::new();
        for i in 0..5 {
            let dir = base.join(format!("r{i}"));
            fs::create_dir(&dir).unwrap();
            entries.push(format!("{}/?.lua", dir.display()));
        }

        let mut options = DiscoveryOptions::default();
        options.probe.max_dirs = 2;
        let paths = SearchPaths::discover(&base, &options, &NativeRuntime, &FixedProbe(entries.join(";")));

        assert_eq!(paths.len(), 3);
        assert_eq!(paths.dirs()[2], base.join("r1"));
    }

    #[test]
    fn test_from_dirs_dedups_preserving_order() {
        let paths = SearchPaths::from_dirs([
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            PathBuf::from("/a"),
        ]);
        assert_eq!(paths.dirs(), &[PathBuf::from("/a"), PathBuf::from("/b")]);
    }
}
