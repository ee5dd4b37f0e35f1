//! JSON report generator.

use super::types::DiffNode;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::baseline::BaselineResult;
use crate::diff::Diff;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, report: &T) -> Result<String, ReportError> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_baseline_report(
        &self,
        result: &BaselineResult<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let diffs = config.show_diff.then(|| {
            result
                .units
                .iter()
                .filter(|unit| config.show_all || unit.is_changed())
                .map(|unit| DiffNode::from_diff(unit.diff, config.show_all))
                .collect()
        });
        self.render(&JsonBaselineReport {
            metadata: metadata(config),
            result,
            diffs,
        })
    }

    fn generate_diff_report(
        &self,
        diff: &Diff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&JsonDiffReport {
            metadata: metadata(config),
            diff: DiffNode::from_diff(diff, config.show_all),
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

fn metadata(config: &ReportConfig) -> JsonReportMetadata {
    JsonReportMetadata {
        tool: ToolInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: Utc::now().to_rfc3339(),
        newer: config.metadata.newer_path.clone(),
        older: config.metadata.older_path.clone(),
    }
}

// JSON report structures

#[derive(Serialize)]
struct JsonBaselineReport<'a, 'd> {
    metadata: JsonReportMetadata,
    result: &'a BaselineResult<'d>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diffs: Option<Vec<DiffNode>>,
}

#[derive(Serialize)]
struct JsonDiffReport {
    metadata: JsonReportMetadata,
    diff: DiffNode,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    newer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    older: Option<String>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}
