//! Indented rendering of a diff tree.

use super::types::is_changed;
use crate::diff::Diff;

/// Render `diff` as one line per node, children indented under their parent.
///
/// Unless `all` is set, unchanged nodes are skipped and one-sided nodes are not
/// expanded.
#[must_use]
pub fn render_diff(diff: &Diff<'_>, all: bool, indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(diff, all, indent, &mut lines);
    lines
}

fn render_into(diff: &Diff<'_>, all: bool, depth: usize, lines: &mut Vec<String>) {
    let mut line = format!(
        "{:indent$}{:<10} {:<16} {}",
        "",
        diff.delta().to_string(),
        diff.kind().label().to_uppercase(),
        diff.name(),
        indent = depth * 2
    );
    if let Some(comment) = diff.element().comment() {
        line.push_str(&format!(" ({comment})"));
    }
    lines.push(line);

    if diff.is_one_sided() && !all {
        return;
    }
    for child in diff.children() {
        if all || is_changed(child) {
            render_into(child, all, depth + 1, lines);
        }
    }
}
