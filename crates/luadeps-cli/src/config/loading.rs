use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::Serialize;
use tracing::debug;

use crate::cli::DiscoveryArgs;
use crate::error::{ConfigError, Result};
use luadeps_graph::DiscoveryOptions;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "luadeps.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "LUADEPS_";

/// Top-level option names read from `LUADEPS_*`; other variables are ignored.
const ENV_KEYS: &[&str] = &["max_dependencies", "manual", "local_dirs", "probe"];

/// Values given explicitly on the command line.
///
/// Unset fields are skipped so they do not mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dependencies: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeOverrides {
    pub enabled: bool,
}

impl Overrides {
    pub fn from_args(args: &DiscoveryArgs, manual: bool) -> Self {
        Self {
            max_dependencies: args.max_deps,
            manual: manual.then_some(true),
            probe: args.no_luarocks.then_some(ProbeOverrides { enabled: false }),
        }
    }
}

/// Load discovery options.
///
/// `config_path` must exist when given; the default `luadeps.toml` is only
/// read if present in `cwd`.
pub fn load(config_path: Option<&Path>, cwd: &Path, overrides: &Overrides) -> Result<DiscoveryOptions> {
    let mut figment = Figment::new().merge(Serialized::defaults(DiscoveryOptions::default()));

    if let Some(path) = config_file(config_path, cwd)? {
        debug!(path = %path.display(), "loading configuration file");
        figment = figment.merge(Toml::file(path));
    }

    figment = figment
        .merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .filter(|key| is_option_key(key.as_str())),
        )
        .merge(Serialized::defaults(overrides));

    figment.extract().map_err(|e| {
        ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: format!("Check {CONFIG_FILE_NAME} syntax and {ENV_PREFIX}* variables"),
        }
        .into()
    })
}

/// Whether a (split) env key names a discovery option.
pub(super) fn is_option_key(key: &str) -> bool {
    let top = key.split('.').next().unwrap_or_default();
    ENV_KEYS.iter().any(|name| name.eq_ignore_ascii_case(top))
}

fn config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            if !path.is_file() {
                return Err(ConfigError::NotFound(path).into());
            }
            Ok(Some(path))
        }
        None => {
            let default = cwd.join(CONFIG_FILE_NAME);
            Ok(default.is_file().then_some(default))
        }
    }
}
