use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;

use super::DependencyGraph;

/// Render the recorded edges as an indented tree under the entry.
///
/// Shared modules are printed under every dependent.
pub fn render_tree(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dependency tree for {}:", display_name(graph.entry()));

    let roots = graph.dependencies(graph.entry());
    if roots.is_empty() {
        out.push_str("(no dependencies)\n");
        return out;
    }

    // (module, prefix, is_last)
    let mut stack: Vec<(&Path, String, bool)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(i, dep)| (dep.as_path(), String::new(), i + 1 == roots.len()))
        .collect();

    while let Some((module, prefix, is_last)) = stack.pop() {
        let branch = if is_last { "└── " } else { "├── " };
        let _ = writeln!(out, "{prefix}{branch}{}", display_name(module));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = graph.dependencies(module);
        for (i, child) in children.iter().enumerate().rev() {
            stack.push((child.as_path(), child_prefix.clone(), i + 1 == children.len()));
        }
    }

    out
}

/// File name only; the full path if there is none.
fn display_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
