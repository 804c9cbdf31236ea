//! `luadeps env`: report the build toolchain found on PATH.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::commands::build::{C_COMPILER, LUASTATIC};
use crate::error::Result;
use crate::ui;

/// A tool `luadeps build` may need and how to get it.
struct Tool {
    name: &'static str,
    install: &'static [&'static str],
}

const TOOLS: &[Tool] = &[
    Tool {
        name: LUASTATIC,
        install: &["luarocks install luastatic"],
    },
    Tool {
        name: C_COMPILER,
        install: &[
            "Ubuntu/Debian: sudo apt install build-essential",
            "Fedora/RHEL:   sudo dnf install gcc",
            "Windows:       https://github.com/niXman/mingw-builds-binaries",
        ],
    },
    Tool {
        name: "lua",
        install: &[
            "Ubuntu/Debian: sudo apt install lua5.4",
            "Fedora/RHEL:   sudo dnf install lua",
            "Windows:       https://www.lua.org/download.html",
        ],
    },
];

/// Execute the env command.
///
/// Missing tools are reported, not treated as failures.
pub fn execute() -> Result<()> {
    let found: Vec<Option<PathBuf>> = TOOLS.iter().map(|tool| which::which(tool.name).ok()).collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &found)?;
    out.flush()?;

    if found.iter().any(Option::is_none) {
        ui::warning("Some build tools are missing; `luadeps build` may fail");
    }
    Ok(())
}

fn write_report(out: &mut impl Write, found: &[Option<PathBuf>]) -> io::Result<()> {
    writeln!(out, "Build environment:")?;
    for (tool, location) in TOOLS.iter().zip(found) {
        writeln!(out, "  {}", ui::tool_status_line(tool.name, location.as_deref()))?;
    }

    for (tool, _) in TOOLS.iter().zip(found).filter(|(_, location)| location.is_none()) {
        writeln!(out)?;
        writeln!(out, "Install {}:", tool.name)?;
        for line in tool.install {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_all_found() {
        let found = vec![
            Some(PathBuf::from("/usr/local/bin/luastatic")),
            Some(PathBuf::from("/usr/bin/gcc")),
            Some(PathBuf::from("/usr/bin/lua")),
        ];
        let mut buf = Vec::new();
        write_report(&mut buf, &found).unwrap();

        insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r"
        Build environment:
          ✓ luastatic (/usr/local/bin/luastatic)
          ✓ gcc (/usr/bin/gcc)
          ✓ lua (/usr/bin/lua)
        ");
    }

    #[test]
    fn test_report_lists_install_hints_for_missing() {
        let found = vec![None, Some(PathBuf::from("/usr/bin/gcc")), None];
        let mut buf = Vec::new();
        write_report(&mut buf, &found).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("✗ luastatic (not found)"));
        assert!(text.contains("Install luastatic:\n  luarocks install luastatic"));
        assert!(text.contains("Install lua:"));
        assert!(!text.contains("Install gcc:"));
    }
}
