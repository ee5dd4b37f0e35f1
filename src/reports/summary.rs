//! Console table of a baseline result.

use super::tree::render_diff;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::baseline::{BaselineResult, ExportedUnitInfo};
use crate::diff::Diff;
use crate::model::{Delta, Version};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const MIN_NAME_WIDTH: usize = 30;

/// Summary reporter: one row for the component, one per unit.
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn row(&self, mismatch: bool, cells: [&str; 7], width: usize) -> String {
        let marker = if mismatch {
            self.color("*", "red")
        } else {
            " ".to_string()
        };
        let [name, kind, delta, newer, older, suggested, providers] = cells;
        format!(
            "{marker} {name:<width$} {kind:<10} {delta:<10} {newer:<12} {older:<12} {suggested:<12} {providers}"
        )
        .trim_end()
        .to_string()
    }

    fn unit_row(&self, unit: &ExportedUnitInfo<'_>, width: usize) -> String {
        let delta = unit.delta.to_string();
        let newer = display(unit.newer_version.as_ref());
        let older = display(unit.older_version.as_ref());
        let suggested = display(unit.suggested_version.as_ref());
        let providers = display(unit.suggested_if_providers.as_ref());
        self.row(
            unit.mismatch,
            [
                &unit.name,
                "PACKAGE",
                &delta,
                &newer,
                &older,
                &suggested,
                &providers,
            ],
            width,
        )
    }
}

fn display(version: Option<&Version>) -> String {
    version.map_or_else(|| "-".to_string(), ToString::to_string)
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_baseline_report(
        &self,
        result: &BaselineResult<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let units: Vec<&ExportedUnitInfo<'_>> = if config.show_all {
            result.units.iter().collect()
        } else {
            result.changed_units().collect()
        };
        let width = units
            .iter()
            .map(|unit| unit.name.len())
            .chain(std::iter::once(result.identity.len()))
            .max()
            .unwrap_or_default()
            .max(MIN_NAME_WIDTH);
        let rule = self.color(&"=".repeat(width + 72), "dim");

        let mut lines = vec![
            rule.clone(),
            self.color(
                &self.row(
                    false,
                    ["Name", "Type", "Delta", "New", "Old", "Suggest", "If Prov."],
                    width,
                ),
                "bold",
            ),
        ];

        let delta = result.delta.to_string();
        let newer = result.newer_version.to_string();
        let older = display(result.older_version.as_ref());
        let suggested = result.suggested_version.to_string();
        lines.push(self.row(
            result.mismatch,
            [
                &result.identity,
                "COMPONENT",
                &delta,
                &newer,
                &older,
                &suggested,
                "-",
            ],
            width,
        ));
        for reason in &result.reason {
            lines.push(format!("    {reason}"));
        }
        lines.push(rule);

        for unit in &units {
            lines.push(self.unit_row(unit, width));
            if unit.mismatch || config.show_all {
                for reason in &unit.reason {
                    lines.push(format!("    {reason}"));
                }
            }
            if config.show_diff && unit.is_changed() {
                lines.extend(render_diff(unit.diff, config.show_all, 2));
            }
            for warning in &unit.warnings {
                let warning = self.color(&format!("warning: {warning}"), "yellow");
                lines.push(format!("    {warning}"));
            }
        }
        if units.is_empty() {
            lines.push(format!("  {}", self.color("No changed units", "dim")));
        }

        lines.push(String::new());
        if result.first_release {
            lines.push("First release, nothing to compare against".to_string());
        }
        for warning in &result.warnings {
            lines.push(self.color(&format!("warning: {warning}"), "yellow"));
        }
        lines.push(if result.has_mismatch() {
            self.color(
                &format!(
                    "Version mismatch: declared {} but suggested {}",
                    result.newer_version, result.suggested_version
                ),
                "red",
            )
        } else {
            self.color("Versions are consistent", "green")
        });

        Ok(lines.join("\n"))
    }

    fn generate_diff_report(
        &self,
        diff: &Diff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        if diff.delta() == Delta::Unchanged && !config.show_all {
            return Ok(self.color("No changes", "dim"));
        }
        Ok(render_diff(diff, config.show_all, 0).join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{Baseliner, ComponentMetadata, UnitMetadata};
    use crate::model::{Element, ElementKind};
    use crate::policy::API_NODE;

    fn component(methods: &[&str]) -> Element {
        let class = Element::builder(ElementKind::Class, "p.C")
            .children(methods.iter().map(|m| Element::leaf(ElementKind::Method, *m)))
            .build();
        Element::builder(ElementKind::Component, "com.example")
            .child(
                Element::builder(ElementKind::Api, API_NODE)
                    .child(Element::builder(ElementKind::Package, "p").child(class).build())
                    .child(Element::builder(ElementKind::Package, "q").build())
                    .build(),
            )
            .build()
    }

    fn meta() -> ComponentMetadata {
        let version = Version::new(1, 0, 0);
        ComponentMetadata::new("com.example", version.clone())
            .with_unit("p", UnitMetadata::new(version.clone()))
            .with_unit("q", UnitMetadata::new(version))
    }

    #[test]
    fn test_summary_marks_mismatch() {
        let older = component(&["a()"]);
        let newer = component(&["a()", "b()"]);
        let diff = Diff::new(&newer, &older).expect("diff");
        let result = Baseliner::default().baseline(&diff, &meta(), Some(&meta()));

        let report = SummaryReporter::new()
            .no_color()
            .generate_baseline_report(&result, &ReportConfig::default())
            .expect("report");

        assert!(report.contains("* com.example"), "{report}");
        assert!(report.contains("* p "), "{report}");
        assert!(report.contains("+ method b() in class p.C in package p"));
        assert!(!report.contains("  q "), "unchanged unit hidden: {report}");
        assert!(report.ends_with("Version mismatch: declared 1.0.0 but suggested 1.1.0"));

        let all = SummaryReporter::new()
            .no_color()
            .generate_baseline_report(
                &result,
                &ReportConfig {
                    show_all: true,
                    show_diff: true,
                    ..ReportConfig::default()
                },
            )
            .expect("report");
        assert!(all.contains("  q "), "{all}");
        assert!(all.contains("ADDED      METHOD           b()"), "{all}");
    }

    #[test]
    fn test_unchanged_diff_report() {
        let tree = component(&["a()"]);
        let diff = Diff::new(&tree, &tree).expect("diff");
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&diff, &ReportConfig::default())
            .expect("report");
        assert_eq!(report, "No changes");
    }
}
