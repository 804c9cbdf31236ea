//! # luadeps-graph
//!
//! Static `require` discovery for Lua source trees.
//!
//! Given an entry script, the crate finds every Lua module it statically
//! requires, without running any code, resolves each one to a file, rejects
//! cycles, and produces a dependency-before-dependent file list suitable for
//! a bundler such as `luastatic`.
//!
//! ```text
//!  entry.lua
//!      │
//!      ▼
//!  ┌─────────┐  (specifier, line)  ┌──────────┐  absolute path  ┌──────────────┐
//!  │ Scanner │ ──────────────────▶ │ Resolver │ ──────────────▶ │ GraphBuilder │
//!  └─────────┘                     └──────────┘                 └──────┬───────┘
//!       ▲                                                              │
//!       └────────────────────── next unvisited file ◀──────────────────┤
//!                                                                      ▼
//!                                                           DependencyGraph ─▶ Manifest
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use luadeps_graph::{Analyzer, DiscoveryOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analysis = Analyzer::new(DiscoveryOptions::default()).analyze(Path::new("main.lua"))?;
//!
//! for module in &analysis.manifest {
//!     println!("{}", module.display());
//! }
//! println!("{}", luadeps_graph::render_tree(&analysis.graph));
//! # Ok(())
//! # }
//! ```
//!
//! ## What counts as static
//!
//! Only `require` calls whose argument is a single string literal are
//! followed. `require(name)`, `require("a" .. b)` and friends abort the
//! pass with [`DiscoveryError::UnresolvableReference`]; nothing is guessed.

pub mod analyzer;
pub mod chain;
pub mod config;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod runtime;
pub mod scanner;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analyzer::{Analysis, Analyzer, analyze_dependencies};
pub use chain::DependencyChain;
pub use config::{DEFAULT_MAX_DEPENDENCIES, DiscoveryOptions, ProbeOptions};
pub use error::{Construct, DiscoveryError, DynamicReason, Result};
pub use graph::{DependencyGraph, GraphBuilder, Manifest, render_tree};
pub use resolver::{
    CommandProbe, ModuleResolver, NoProbe, Resolution, SearchPathProbe, SearchPaths,
};
pub use runtime::{NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use scanner::{Reference, Scanner, scan_references};
pub use source::{SourceEncoding, SourceText};
