//! Error taxonomy for a discovery pass.
//!
//! Every variant is terminal: the pass stops at the first one and no partial
//! manifest is produced.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::chain::DependencyChain;
use crate::runtime::RuntimeError;

/// Result type alias using [`DiscoveryError`] as the default error type.
pub type Result<T, E = DiscoveryError> = std::result::Result<T, E>;

/// Why a `require` argument could not be determined from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicReason {
    /// The argument is an identifier, call, table or anything but a literal.
    NonLiteralArgument,
    /// A literal argument is followed by the `..` concatenation operator.
    Concatenation,
}

impl fmt::Display for DynamicReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicReason::NonLiteralArgument => f.write_str("argument is not a string literal"),
            DynamicReason::Concatenation => f.write_str("string concatenation is not supported"),
        }
    }
}

/// A string or comment construct that can be left open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `'...'` or `"..."`
    ShortString,
    /// `[[...]]`, `[==[...]==]`
    LongString,
    /// `--[[...]]`
    BlockComment,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::ShortString => f.write_str("string literal"),
            Construct::LongString => f.write_str("long string"),
            Construct::BlockComment => f.write_str("block comment"),
        }
    }
}

/// Errors raised by a discovery pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The entry script does not exist.
    #[error("Lua script not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    /// A resolved dependency disappeared before it could be read.
    #[error("Lua script not found: {}", .path.display())]
    ScriptNotFound { path: PathBuf },

    /// A dependency exists but could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// `require` with an argument that is not statically known.
    #[error(
        "Dynamic require detected in '{}' at line {line}: {snippet} ({reason})",
        .file.display()
    )]
    UnresolvableReference {
        file: PathBuf,
        line: usize,
        snippet: String,
        reason: DynamicReason,
    },

    /// A string or comment is still open at end of input.
    #[error("Unterminated {construct} in '{}' starting at line {line}", .file.display())]
    MalformedSource {
        file: PathBuf,
        line: usize,
        construct: Construct,
    },

    /// No candidate file exists for a specifier in any search location.
    #[error(
        "Cannot resolve module '{specifier}' required from '{}'. Searched in:\n{}",
        .from.display(),
        format_searched(.searched)
    )]
    ModuleNotFound {
        specifier: String,
        from: PathBuf,
        searched: Vec<PathBuf>,
    },

    /// The first matching candidate is a compiled C module.
    #[error("C module '{specifier}' detected at '{}' (.so, .dll and .dylib modules are not supported)", .path.display())]
    UnsupportedNativeModule { specifier: String, path: PathBuf },

    /// A file was reached again while still open on the traversal stack.
    #[error("Circular dependency detected: {}", .chain.format_chain())]
    CircularDependency { chain: DependencyChain },

    /// More distinct files were discovered than the configured ceiling allows.
    #[error("Total dependency count ({count}) exceeds limit ({limit})")]
    DependencyLimitExceeded { count: usize, limit: usize },
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_not_found_lists_every_location() {
        let err = DiscoveryError::ModuleNotFound {
            specifier: "foo.bar".to_string(),
            from: PathBuf::from("/project/main.lua"),
            searched: vec![PathBuf::from("/project"), PathBuf::from("/project/lib")],
        };

        let msg = err.to_string();
        assert!(msg.contains("'foo.bar'"));
        assert!(msg.contains("  - /project\n  - /project/lib"));
    }

    #[test]
    fn test_limit_message_reports_both_numbers() {
        let err = DiscoveryError::DependencyLimitExceeded { count: 5, limit: 3 };
        assert_eq!(err.to_string(), "Total dependency count (5) exceeds limit (3)");
    }

    #[test]
    fn test_dynamic_message_includes_reason() {
        let err = DiscoveryError::UnresolvableReference {
            file: PathBuf::from("main.lua"),
            line: 3,
            snippet: "require(name)".to_string(),
            reason: DynamicReason::NonLiteralArgument,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("require(name)"));
        assert!(msg.contains("not a string literal"));
    }
}
