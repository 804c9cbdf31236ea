//! Native Runtime Implementation
//!
//! ```text
//! ┌─────────────────┐
//! │ NativeRuntime   │
//! │  .read_file()   │────▶ std::fs::read()
//! │  .is_file()     │────▶ std::path::Path::is_file()
//! │  .canonicalize()│────▶ std::fs::canonicalize()
//! └─────────────────┘
//! ```

use std::path::{Path, PathBuf};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RuntimeError {
    if err.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| io_error(path, e))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| io_error(path, e))
    }

    fn current_dir(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir().map_err(|e| io_error(Path::new("."), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.lua");

        let err = NativeRuntime.read_file(&missing).unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(p) if p == missing));
    }

    #[test]
    fn test_file_and_dir_queries() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.lua");
        fs::write(&file, "return {}").unwrap();

        let runtime = NativeRuntime::new();
        assert!(runtime.is_file(&file));
        assert!(!runtime.is_dir(&file));
        assert!(runtime.is_dir(temp.path()));
        assert_eq!(runtime.read_file(&file).unwrap(), b"return {}");
    }
}
