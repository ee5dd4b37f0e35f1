//! Compatibility severities.
//!
//! A [`Delta`] is either an ordinal severity (`Ignored` through `Major`) or one
//! of the two raw match outcomes (`Removed`, `Added`) produced when a node only
//! exists on one side of a comparison. The ordinal part is totally ordered:
//!
//! ```text
//! Ignored < Unchanged < Changed < Micro < Minor < Major
//! ```
//!
//! `Changed` is deliberately its own level: a constant or default value change
//! is visible in the result but does not by itself require a micro bump.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a change, or the raw outcome of matching a single node.
///
/// The derived ordering follows declaration order. Comparisons are only
/// meaningful between ordinal values; use [`Delta::escalate`] to fold severities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Delta {
    /// Masked by an ignore predicate; neutral when folding
    Ignored,
    /// No observable change
    Unchanged,
    /// Value-level change (constants, default values, resources)
    Changed,
    /// Requires a micro bump
    Micro,
    /// Requires a minor bump
    Minor,
    /// Requires a major bump
    Major,
    /// Raw outcome: the node only exists in the older tree
    Removed,
    /// Raw outcome: the node only exists in the newer tree
    Added,
}

impl Delta {
    /// All ordinal severities, lowest first.
    pub const ORDINALS: [Delta; 6] = [
        Delta::Ignored,
        Delta::Unchanged,
        Delta::Changed,
        Delta::Micro,
        Delta::Minor,
        Delta::Major,
    ];

    /// Returns true for the ordinal severities (everything except `Added`/`Removed`).
    #[must_use]
    pub const fn is_ordinal(self) -> bool {
        !matches!(self, Delta::Added | Delta::Removed)
    }

    /// Returns true for the raw one-sided outcomes.
    #[must_use]
    pub const fn is_one_sided(self) -> bool {
        matches!(self, Delta::Added | Delta::Removed)
    }

    /// Fold `other` into an accumulated severity.
    ///
    /// `Ignored` never participates: it leaves the accumulator as it is, and an
    /// ignored accumulator adopts whatever comes next. Otherwise the higher
    /// severity wins.
    #[must_use]
    pub fn escalate(self, other: Delta) -> Delta {
        debug_assert!(self.is_ordinal() && other.is_ordinal());
        match (self, other) {
            (acc, Delta::Ignored) => acc,
            (Delta::Ignored, next) => next,
            (acc, next) => acc.max(next),
        }
    }

    /// Severity of an element's content for whole-component suggestions.
    ///
    /// Added units count as minor, removed ones as major and ignored ones as
    /// unchanged.
    #[must_use]
    pub const fn content_severity(self) -> Delta {
        match self {
            Delta::Ignored | Delta::Unchanged => Delta::Unchanged,
            Delta::Added => Delta::Minor,
            Delta::Changed | Delta::Micro | Delta::Minor | Delta::Major => self,
            Delta::Removed => Delta::Major,
        }
    }

    /// Lowercase label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Delta::Ignored => "ignored",
            Delta::Unchanged => "unchanged",
            Delta::Changed => "changed",
            Delta::Micro => "micro",
            Delta::Minor => "minor",
            Delta::Major => "major",
            Delta::Removed => "removed",
            Delta::Added => "added",
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_uppercase())
    }
}
