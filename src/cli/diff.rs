//! Diff command handler.
//!
//! Implements the `diff` subcommand: print the changed nodes of the structural
//! diff between two snapshots.

use super::ensure_valid;
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_snapshot_with_context, output_diff_report, Comparison};
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: AppConfig, newer: &Path, older: &Path) -> Result<i32> {
    ensure_valid(&config)?;
    let quiet = config.behavior.quiet;

    let newer_snapshot = load_snapshot_with_context(newer, quiet)?;
    let older_snapshot = load_snapshot_with_context(older, quiet)?;

    let comparison = Comparison::new(newer_snapshot, Some(older_snapshot), &config.policy);
    let diff = comparison.diff()?;
    if !quiet {
        tracing::info!("Diff of {} nodes, overall {}", diff.size(), diff.delta());
    }

    output_diff_report(&config, &diff, newer, older)?;
    Ok(exit_codes::SUCCESS)
}
