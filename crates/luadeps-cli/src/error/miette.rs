//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use luadeps_graph::DiscoveryError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Discovery(e) => discovery_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert DiscoveryError to miette Report, adding a hint where one helps.
pub fn discovery_error_to_miette(err: DiscoveryError) -> Report {
    match discovery_hint(&err) {
        Some(hint) => miette::miette!("{}\n\nHint: {}", err, hint),
        None => miette::miette!("{}", err),
    }
}

fn discovery_hint(err: &DiscoveryError) -> Option<&'static str> {
    let hint = match err {
        DiscoveryError::EntryNotFound { .. } => "Check the entry script path",
        DiscoveryError::UnresolvableReference { .. } => {
            "Only require(\"literal\") can be followed; list dynamic modules with `build --manual --require`"
        }
        DiscoveryError::MalformedSource { .. } => "Close the string or comment, or check the file with `luac -p`",
        DiscoveryError::ModuleNotFound { .. } => {
            "Install the module with luarocks or place it in lua_modules/, lib/ or src/"
        }
        DiscoveryError::UnsupportedNativeModule { .. } => {
            "C modules cannot be bundled; link them manually or use a pure-Lua alternative"
        }
        DiscoveryError::CircularDependency { .. } => "Refactor to remove circular requires",
        DiscoveryError::DependencyLimitExceeded { .. } => "Raise the limit with --max-deps or max_dependencies in luadeps.toml",
        DiscoveryError::ScriptNotFound { .. } | DiscoveryError::ReadFailed { .. } => return None,
    };
    Some(hint)
}
