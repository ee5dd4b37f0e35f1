//! Tree building and diff stage.

use super::PipelineError;
use crate::baseline::ComponentMetadata;
use crate::config::PolicyConfig;
use crate::diff::Diff;
use crate::model::Element;
use crate::snapshot::Snapshot;
use anyhow::Result;

/// Both sides of a comparison with their element trees.
///
/// Diffs borrow the trees, so the comparison owns them for as long as any
/// diff or baseline result is alive.
pub struct Comparison {
    newer: Snapshot,
    older: Option<Snapshot>,
    newer_tree: Element,
    older_tree: Option<Element>,
}

impl Comparison {
    /// Build the element trees of both sides under `policy`.
    pub fn new(newer: Snapshot, older: Option<Snapshot>, policy: &PolicyConfig) -> Self {
        let newer_tree = newer.to_element(policy);
        let older_tree = older.as_ref().map(|older| older.to_element(policy));
        Self {
            newer,
            older,
            newer_tree,
            older_tree,
        }
    }

    /// Diff of the newer tree against the older one, or a one-sided diff of
    /// the newer tree when there is no older release.
    pub fn diff(&self) -> Result<Diff<'_>> {
        let diff = match &self.older_tree {
            Some(older) => Diff::new(&self.newer_tree, older),
            None => Diff::added(&self.newer_tree),
        }
        .map_err(|e| PipelineError::DiffFailed { source: e.into() })?;

        tracing::debug!(nodes = diff.size(), delta = %diff.delta(), "computed diff");
        Ok(diff)
    }

    #[must_use]
    pub const fn newer(&self) -> &Snapshot {
        &self.newer
    }

    #[must_use]
    pub const fn older(&self) -> Option<&Snapshot> {
        self.older.as_ref()
    }

    #[must_use]
    pub fn newer_metadata(&self) -> ComponentMetadata {
        self.newer.metadata()
    }

    #[must_use]
    pub fn older_metadata(&self) -> Option<ComponentMetadata> {
        self.older.as_ref().map(Snapshot::metadata)
    }
}
