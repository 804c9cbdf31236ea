//! Text loader: reads a module file and decodes it.
//!
//! Encodings are tried most-specific first: UTF-8, then GBK, then Latin-1.
//! Latin-1 maps every byte to a code point, so the last step cannot fail.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::runtime::{Runtime, RuntimeError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The encoding a [`SourceText`] was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Gbk,
    Latin1,
}

/// The decoded text of one module file.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
    pub encoding: SourceEncoding,
}

impl SourceText {
    /// Read and decode `path` through `runtime`.
    pub fn load(runtime: &dyn Runtime, path: &Path) -> Result<Self> {
        let bytes = runtime.read_file(path).map_err(|err| match err {
            RuntimeError::FileNotFound(path) => DiscoveryError::ScriptNotFound { path },
            source => DiscoveryError::ReadFailed {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let (text, encoding) = decode(&bytes);
        if encoding != SourceEncoding::Utf8 {
            debug!(path = %path.display(), ?encoding, "decoded with fallback encoding");
        }

        Ok(Self {
            path: path.to_path_buf(),
            text,
            encoding,
        })
    }
}

/// Decode raw file bytes with the UTF-8 → GBK → Latin-1 fallback chain.
pub fn decode(bytes: &[u8]) -> (String, SourceEncoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_owned(), SourceEncoding::Utf8);
    }

    if let Some(text) = encoding_rs::GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text.into_owned(), SourceEncoding::Gbk);
    }

    (bytes.iter().map(|&b| char::from(b)).collect(), SourceEncoding::Latin1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::NativeRuntime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode("require('模块')".as_bytes());
        assert_eq!(text, "require('模块')");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_decode_strips_bom() {
        let (text, encoding) = decode(b"\xEF\xBB\xBFreturn {}");
        assert_eq!(text, "return {}");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_decode_gbk_fallback() {
        // "中文" in GBK
        let bytes = b"-- \xD6\xD0\xCE\xC4\nreturn {}";
        let (text, encoding) = decode(bytes);
        assert_eq!(encoding, SourceEncoding::Gbk);
        assert_eq!(text, "-- 中文\nreturn {}");
    }

    #[test]
    fn test_decode_latin1_last_resort() {
        // 0xFF is neither valid UTF-8 nor a GBK lead byte
        let bytes = b"x = '\xFF'";
        let (text, encoding) = decode(bytes);
        assert_eq!(encoding, SourceEncoding::Latin1);
        assert_eq!(text.chars().count(), bytes.len());
    }

    #[test]
    fn test_load_missing_file_is_script_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.lua");

        let err = SourceText::load(&NativeRuntime, &missing).unwrap_err();
        assert!(matches!(err, DiscoveryError::ScriptNotFound { path } if path == missing));
    }

    #[test]
    fn test_load_reads_text() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.lua");
        fs::write(&file, "return 1").unwrap();

        let source = SourceText::load(&NativeRuntime, &file).unwrap();
        assert_eq!(source.text, "return 1");
        assert_eq!(source.path, file);
    }
}
