//! Snapshot loading stage.

use super::PipelineError;
use crate::snapshot::Snapshot;
use anyhow::Result;
use std::path::Path;

/// Load a snapshot with the path in the error message.
pub fn load_snapshot_with_context(path: &Path, quiet: bool) -> Result<Snapshot> {
    if !quiet {
        tracing::info!("Loading snapshot: {:?}", path);
    }

    let snapshot = Snapshot::load(path).map_err(|e| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            "Loaded {} {} with {} units and {} types",
            snapshot.identity,
            snapshot.version.as_deref().unwrap_or("(unversioned)"),
            snapshot.units.len(),
            snapshot.types.len()
        );
    }
    Ok(snapshot)
}
