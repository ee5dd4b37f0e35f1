//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod baseline;
mod diff;

pub use baseline::run_baseline;
pub use diff::run_diff;

use crate::config::{AppConfig, Validatable};
use crate::error::BaselineError;
use std::path::PathBuf;

/// Snapshot files of the two sides.
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub newer: PathBuf,
    /// Absent for a first release
    pub older: Option<PathBuf>,
}

/// Reject configurations that would fail halfway through a run.
fn ensure_valid(config: &AppConfig) -> Result<(), BaselineError> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(BaselineError::validation(message))
}
