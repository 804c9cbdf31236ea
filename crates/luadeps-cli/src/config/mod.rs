//! Layered configuration for discovery runs.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in [`DiscoveryOptions`] defaults
//! 2. `luadeps.toml` in the working directory, or the file given by `--config`
//! 3. `LUADEPS_*` environment variables (`__` separates nested keys, so
//!    `LUADEPS_PROBE__ENABLED=false` sets `probe.enabled`)
//! 4. Command-line flags
//!
//! ```toml
//! max_dependencies = 50
//! local_dirs = ["lua_modules", "vendor"]
//!
//! [probe]
//! timeout_ms = 2000
//! ```

mod loading;

pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX, Overrides, load};
pub use luadeps_graph::DiscoveryOptions;
