//! File-system runtime abstraction for dependency discovery.
//!
//! Every file-system query made by the scanner, resolver and graph builder
//! goes through the [`Runtime`] trait. The native implementation wraps
//! `std::fs`; tests can substitute their own implementation to observe or
//! restrict what the discovery pass touches.

mod native;

pub use native::NativeRuntime;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

/// Platform runtime trait
///
/// Discovery is single-threaded and synchronous, so every method blocks. The
/// `Send + Sync` bounds let one runtime be shared as `Arc<dyn Runtime>`
/// between the resolver and the graph builder.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Check if a path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Resolve a path to its canonical absolute form (symlinks followed).
    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;

    /// Get the current working directory
    fn current_dir(&self) -> RuntimeResult<PathBuf>;
}
