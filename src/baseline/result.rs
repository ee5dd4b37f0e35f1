//! Baseline outcomes.

use crate::diff::Diff;
use crate::model::{Delta, Version};
use indexmap::IndexMap;
use serde::Serialize;

/// Outcome for one exported unit.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedUnitInfo<'d> {
    pub name: String,
    /// Unit delta after ignores: raw `ADDED`/`REMOVED` or the folded severity
    pub delta: Delta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_version: Option<Version>,
    /// Attributes of the newer side, or of the older one for removed units
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_version: Option<Version>,
    /// Suggestion if the listed interfaces were declared provider types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_if_providers: Option<Version>,
    pub mismatch: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Root cause lines for a changed unit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reason: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<String>,
    #[serde(skip)]
    pub diff: &'d Diff<'d>,
}

impl ExportedUnitInfo<'_> {
    /// Severity of the unit's content for the component suggestion.
    #[must_use]
    pub const fn content_severity(&self) -> Delta {
        self.delta.content_severity()
    }

    /// Returns true when the unit changed in any way that needs reporting.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.delta.is_one_sided() || self.delta > Delta::Unchanged
    }
}

/// Outcome for a whole component.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineResult<'d> {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_identity: Option<String>,
    pub newer_version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_version: Option<Version>,
    pub suggested_version: Version,
    pub mismatch: bool,
    pub first_release: bool,
    /// Raw delta of the full component diff
    pub delta: Delta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reason: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub units: Vec<ExportedUnitInfo<'d>>,
    #[serde(skip)]
    pub diff: &'d Diff<'d>,
}

impl<'d> BaselineResult<'d> {
    /// True when the component or any unit is under-versioned.
    #[must_use]
    pub fn has_mismatch(&self) -> bool {
        self.mismatch || self.units.iter().any(|unit| unit.mismatch)
    }

    /// Units that need to be looked at: changed or mismatched.
    pub fn changed_units(&self) -> impl Iterator<Item = &ExportedUnitInfo<'d>> {
        self.units
            .iter()
            .filter(|unit| unit.mismatch || unit.is_changed())
    }

    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&ExportedUnitInfo<'d>> {
        self.units.iter().find(|unit| unit.name == name)
    }
}
