//! Module resolution: specifier plus referencing file to an absolute path.
//!
//! Two specifier shapes are understood:
//!
//! - **Relative** (`./x`, `../x`): resolved against the directory of the
//!   referencing file, ignoring the search list.
//! - **Dotted** (`a.b.c`): mapped to `a/b/c` and tried against every search
//!   directory in priority order.
//!
//! For both shapes `x.lua` is tried before `x/init.lua`. Compiled modules
//! (`.so`, `.dll`, `.dylib`) are looked for only once every source candidate
//! has missed, and are reported as unsupported rather than resolved.

mod probe;
mod search_path;

pub use probe::{CommandProbe, NoProbe, SearchPathProbe, parse_search_path_output};
pub use search_path::SearchPaths;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tracing::{debug, trace};

use crate::error::{DiscoveryError, Result};
use crate::runtime::Runtime;

/// File extension of Lua source modules.
pub const LUA_EXTENSION: &str = "lua";

/// File that makes a directory loadable as a package.
pub const PACKAGE_ENTRY: &str = "init.lua";

/// Extensions of compiled modules, in probing order.
pub const NATIVE_EXTENSIONS: &[&str] = &["so", "dll", "dylib"];

/// The first existing candidate for a specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A Lua source file.
    Source(PathBuf),
    /// A compiled module; cannot be bundled.
    Native(PathBuf),
}

/// Resolves `require` specifiers for one discovery pass.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    runtime: Arc<dyn Runtime>,
    search_paths: SearchPaths,
}

impl ModuleResolver {
    pub fn new(runtime: Arc<dyn Runtime>, search_paths: SearchPaths) -> Self {
        Self {
            runtime,
            search_paths,
        }
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// Resolve `specifier` as written in `from` to a Lua source file.
    pub fn resolve(&self, specifier: &str, from: &Path) -> Result<PathBuf> {
        match self.locate(specifier, from) {
            Some(Resolution::Source(path)) => {
                debug!(specifier, from = %from.display(), resolved = %path.display(), "resolved module");
                Ok(path)
            }
            Some(Resolution::Native(path)) => Err(DiscoveryError::UnsupportedNativeModule {
                specifier: specifier.to_string(),
                path,
            }),
            None => Err(DiscoveryError::ModuleNotFound {
                specifier: specifier.to_string(),
                from: from.to_path_buf(),
                searched: self.searched_for(specifier, from),
            }),
        }
    }

    /// First existing candidate for `specifier`, source or native.
    pub fn locate(&self, specifier: &str, from: &Path) -> Option<Resolution> {
        if is_relative(specifier) {
            self.locate_relative(specifier, from)
        } else {
            self.locate_dotted(specifier)
        }
    }

    fn locate_relative(&self, specifier: &str, from: &Path) -> Option<Resolution> {
        let base = parent_dir(from).join(specifier).clean();

        if has_lua_extension(&base) {
            return self.existing(base).map(Resolution::Source);
        }

        source_candidates(&base)
            .into_iter()
            .find_map(|candidate| self.existing(candidate))
            .map(Resolution::Source)
            .or_else(|| {
                native_candidates(&base)
                    .find_map(|candidate| self.existing(candidate))
                    .map(Resolution::Native)
            })
    }

    fn locate_dotted(&self, specifier: &str) -> Option<Resolution> {
        let module_path: PathBuf = specifier.split('.').collect();

        let source = self.search_paths.iter().find_map(|dir| {
            source_candidates(&dir.join(&module_path))
                .into_iter()
                .find_map(|candidate| self.existing(candidate))
        });
        if let Some(path) = source {
            return Some(Resolution::Source(path));
        }

        self.search_paths
            .iter()
            .find_map(|dir| native_candidates(&dir.join(&module_path)).find_map(|c| self.existing(c)))
            .map(Resolution::Native)
    }

    /// Locations reported when `specifier` cannot be found.
    fn searched_for(&self, specifier: &str, from: &Path) -> Vec<PathBuf> {
        if is_relative(specifier) {
            vec![parent_dir(from).to_path_buf()]
        } else {
            self.search_paths.dirs().to_vec()
        }
    }

    /// Canonical form of `candidate` if it is an existing file.
    fn existing(&self, candidate: PathBuf) -> Option<PathBuf> {
        trace!(candidate = %candidate.display(), "probing candidate");
        if !self.runtime.is_file(&candidate) {
            return None;
        }
        Some(self.runtime.canonicalize(&candidate).unwrap_or(candidate))
    }
}

/// `./x` and `../x`, with either separator.
pub fn is_relative(specifier: &str) -> bool {
    ["./", "../", ".\\", "..\\"]
        .iter()
        .any(|prefix| specifier.starts_with(prefix))
}

fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(Path::new(""))
}

fn has_lua_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == LUA_EXTENSION)
}

/// `base.lua`, then `base/init.lua`.
fn source_candidates(base: &Path) -> [PathBuf; 2] {
    [with_suffix(base, LUA_EXTENSION), base.join(PACKAGE_ENTRY)]
}

fn native_candidates(base: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    NATIVE_EXTENSIONS.iter().map(move |ext| with_suffix(base, ext))
}

/// Append `.ext` without replacing an existing extension (`a.b` → `a.b.lua`).
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
