//! External package-manager search-path probe.
//!
//! The probe runs a command such as `luarocks path --lr-path` and hands back
//! its raw output. Every failure mode (missing program, non-zero exit, empty
//! output, timeout) collapses to `None`.

use std::fmt::Debug;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ProbeOptions;

/// Wildcard suffixes stripped from each search-path template.
const TEMPLATE_SUFFIXES: &[&str] = &["?/init.lua", "?\\init.lua", "?.lua"];

/// Source of extra module search directories.
pub trait SearchPathProbe: Send + Sync + Debug {
    /// Raw search-path output, or `None` if the source is unavailable.
    fn query(&self) -> Option<String>;
}

/// Probe that contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl SearchPathProbe for NoProbe {
    fn query(&self) -> Option<String> {
        None
    }
}

/// Runs an external program with a hard deadline.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_options(options: &ProbeOptions) -> Self {
        Self::new(options.program.clone(), options.args.clone(), options.timeout())
    }

    async fn run(&self) -> Option<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                debug!(program = %self.program, error = %err, "search-path probe unavailable");
                return None;
            }
            Err(_) => {
                debug!(program = %self.program, timeout = ?self.timeout, "search-path probe timed out");
                return None;
            }
        };

        if !output.status.success() {
            debug!(program = %self.program, status = %output.status, "search-path probe failed");
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

impl SearchPathProbe for CommandProbe {
    fn query(&self) -> Option<String> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.run_blocking();
        }

        // A runtime cannot be started on a thread that already drives one.
        debug!("running search-path probe on a helper thread");
        std::thread::scope(|scope| scope.spawn(|| self.run_blocking()).join().ok().flatten())
    }
}

impl CommandProbe {
    fn run_blocking(&self) -> Option<String> {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                debug!(error = %err, "could not start probe runtime");
                return None;
            }
        };
        runtime.block_on(self.run())
    }
}

/// Split probe output into candidate directories.
///
/// Entries are unquoted and stripped of `?.lua` / `?/init.lua` templates.
/// Existence is not checked here.
pub fn parse_search_path_output(output: &str) -> Vec<PathBuf> {
    let mut raw = output.trim();

    // Some versions print shell assignments; the path list is on the last line.
    if raw.contains('=') && raw.contains('\n') {
        raw = raw.lines().last().unwrap_or(raw).trim();
    }
    if let Some((name, value)) = raw.split_once('=') {
        if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ') {
            raw = value;
        }
    }

    raw.split(is_list_separator)
        .filter_map(|entry| {
            let mut entry = unquote(entry.trim());
            for suffix in TEMPLATE_SUFFIXES {
                if let Some(stripped) = entry.strip_suffix(suffix) {
                    entry = stripped;
                    break;
                }
            }
            let entry = entry.trim();
            (!entry.is_empty()).then(|| PathBuf::from(entry))
        })
        .collect()
}

fn is_list_separator(c: char) -> bool {
    c == ';' || (cfg!(not(windows)) && c == ':')
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lua_path_templates() {
        let dirs = parse_search_path_output(
            "/usr/local/share/lua/5.4/?.lua;/usr/local/share/lua/5.4/?/init.lua;./?.lua",
        );
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/usr/local/share/lua/5.4/"),
                PathBuf::from("/usr/local/share/lua/5.4/"),
                PathBuf::from("./"),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_shell_assignment() {
        let output = "export LUA_CPATH='/x/?.so'\nLUA_PATH='/home/u/.luarocks/share/lua/5.4/?.lua'";
        let dirs = parse_search_path_output(output);
        assert_eq!(dirs, vec![PathBuf::from("/home/u/.luarocks/share/lua/5.4/")]);
    }

    #[test]
    fn test_parse_skips_empty_entries() {
        assert!(parse_search_path_output(";;  ;").is_empty());
        assert!(parse_search_path_output("").is_empty());
    }

    #[test]
    fn test_no_probe_is_empty() {
        assert_eq!(NoProbe.query(), None);
    }

    #[test]
    fn test_missing_program_yields_none() {
        let probe = CommandProbe::new(
            "luadeps-definitely-not-installed",
            vec![],
            Duration::from_millis(500),
        );
        assert_eq!(probe.query(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_yields_none() {
        let probe = CommandProbe::new("false", vec![], Duration::from_secs(5));
        assert_eq!(probe.query(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_yields_none() {
        let probe = CommandProbe::new("sleep", vec!["5".into()], Duration::from_millis(50));
        assert_eq!(probe.query(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_query_inside_running_runtime() {
        let outer = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let probe = CommandProbe::new("echo", vec!["/a/?.lua".into()], Duration::from_secs(5));

        let output = outer.block_on(async { probe.query() });
        assert_eq!(output.as_deref(), Some("/a/?.lua"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_returned() {
        let probe = CommandProbe::new("echo", vec!["/a/?.lua".into()], Duration::from_secs(5));
        assert_eq!(probe.query().as_deref(), Some("/a/?.lua"));
    }
}
