//! Report type definitions.

use crate::diff::Diff;
use crate::model::{Delta, ElementKind};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console table of the component and its units
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include unchanged units
    pub show_all: bool,
    /// Include the changed nodes of each unit's diff
    pub show_diff: bool,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Newer snapshot file path
    pub newer_path: Option<String>,
    /// Older snapshot file path
    pub older_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}

/// Serializable view of a diff subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffNode {
    pub kind: ElementKind,
    pub name: String,
    pub delta: Delta,
    pub severity: Delta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    /// Convert a diff, keeping only changed nodes unless `all` is set.
    ///
    /// One-sided nodes are not expanded: their children share the outcome.
    #[must_use]
    pub fn from_diff(diff: &Diff<'_>, all: bool) -> Self {
        let children = if diff.is_one_sided() && !all {
            Vec::new()
        } else {
            diff.children()
                .iter()
                .filter(|child| all || is_changed(child))
                .map(|child| Self::from_diff(child, all))
                .collect()
        };
        Self {
            kind: diff.kind(),
            name: diff.name().to_string(),
            delta: diff.delta(),
            severity: diff.severity(),
            comment: diff.element().comment().map(str::to_string),
            children,
        }
    }
}

/// A node worth reporting: one-sided or folded above `Unchanged`.
#[must_use]
pub fn is_changed(diff: &Diff<'_>) -> bool {
    diff.is_one_sided() || diff.delta() > Delta::Unchanged
}
