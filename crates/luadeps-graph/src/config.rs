//! Options for a discovery pass.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default ceiling on discovered files, entry excluded.
pub const DEFAULT_MAX_DEPENDENCIES: usize = 36;

/// Options controlling one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryOptions {
    /// Maximum number of distinct discovered files, entry excluded.
    pub max_dependencies: usize,

    /// Skip discovery entirely and return an empty manifest.
    pub manual: bool,

    /// Conventional subdirectories of the entry's directory that join the
    /// search list when they exist.
    pub local_dirs: Vec<String>,

    /// External package-manager search-path probe.
    pub probe: ProbeOptions,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_dependencies: DEFAULT_MAX_DEPENDENCIES,
            manual: false,
            local_dirs: vec!["lua_modules".into(), "lib".into(), "src".into()],
            probe: ProbeOptions::default(),
        }
    }
}

impl DiscoveryOptions {
    pub fn with_max_dependencies(mut self, max: usize) -> Self {
        self.max_dependencies = max;
        self
    }

    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Disable the external search-path probe.
    pub fn without_probe(mut self) -> Self {
        self.probe.enabled = false;
        self
    }
}

/// How the package manager is asked for its module search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeOptions {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    /// Hard deadline for the probe process, in milliseconds.
    pub timeout_ms: u64,
    /// Upper bound on directories taken from the probe output.
    pub max_dirs: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "luarocks".into(),
            args: vec!["path".into(), "--lr-path".into()],
            timeout_ms: 5_000,
            max_dirs: 64,
        }
    }
}

impl ProbeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
