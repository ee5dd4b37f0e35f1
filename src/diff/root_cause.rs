//! Minimal explanation of a folded severity.
//!
//! Starting from a node and its dominant severity, the reporter follows only
//! children whose mapped severity equals the dominant one. One-sided children
//! end a branch with a `+`/`-` line; two-sided ones are descended into.

use super::engine::{Diff, NoReclassify, Reclassify};
use crate::model::Delta;

/// Root cause of `diff`'s memoized severity.
#[must_use]
pub fn root_cause(diff: &Diff<'_>) -> Vec<String> {
    explain(diff, diff.delta(), &NoReclassify)
}

/// Lines explaining why `diff` folds to `dominant` under `hook`.
///
/// Each line names the changed node followed by its path back to `diff`, for
/// example `+ method n() in class p.C in package p`.
#[must_use]
pub fn explain(diff: &Diff<'_>, dominant: Delta, hook: &dyn Reclassify) -> Vec<String> {
    let mut lines = Vec::new();
    if diff.is_one_sided() {
        lines.push(line(diff, &[]));
        return lines;
    }
    if dominant <= Delta::Unchanged || !dominant.is_ordinal() {
        return lines;
    }

    let mut ancestors = Vec::new();
    descend(diff, dominant, hook, &mut ancestors, &mut lines);
    lines
}

fn descend<'s, 'a>(
    diff: &'s Diff<'a>,
    dominant: Delta,
    hook: &dyn Reclassify,
    ancestors: &mut Vec<&'s Diff<'a>>,
    lines: &mut Vec<String>,
) {
    ancestors.push(diff);
    for child in diff.children() {
        if child.mapped_in(hook, ancestors) != dominant {
            continue;
        }
        if child.is_one_sided() {
            lines.push(line(child, ancestors));
            continue;
        }
        let before = lines.len();
        descend(child, dominant, hook, ancestors, lines);
        if lines.len() == before {
            // Severity came from the hook rather than from a changed leaf
            lines.push(line(child, ancestors));
        }
    }
    ancestors.pop();
}

fn line(diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> String {
    let sign = match diff.delta() {
        Delta::Added => '+',
        Delta::Removed => '-',
        _ => '~',
    };
    let mut text = format!("{sign} {} {}", diff.kind(), diff.name());
    for ancestor in ancestors.iter().rev() {
        text.push_str(&format!(" in {} {}", ancestor.kind(), ancestor.name()));
    }
    text
}
