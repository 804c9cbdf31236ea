//! Fixture helpers shared by unit tests and dependent crates.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::runtime::{NativeRuntime, Runtime, RuntimeResult};

/// Write `files` (relative path, content) under `root`, creating parent
/// directories, and return the canonical root.
///
/// # Panics
///
/// Panics on any I/O error; this is test-only code.
pub fn create_lua_project(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture directory");
        }
        fs::write(&path, content).expect("write fixture file");
    }
    root.canonicalize().expect("canonicalize fixture root")
}

/// Native runtime that counts every call made through it.
#[derive(Debug, Default)]
pub struct CountingRuntime {
    inner: NativeRuntime,
    calls: AtomicUsize,
}

impl CountingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Runtime for CountingRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.tick();
        self.inner.read_file(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.tick();
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.tick();
        self.inner.is_dir(path)
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        self.tick();
        self.inner.canonicalize(path)
    }

    fn current_dir(&self) -> RuntimeResult<PathBuf> {
        self.tick();
        self.inner.current_dir()
    }
}
