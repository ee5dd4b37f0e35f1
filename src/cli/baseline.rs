//! Baseline command handler.
//!
//! Implements the `baseline` subcommand: compare a newer snapshot against an
//! optional older one and report the versions each unit should declare.

use super::{ensure_valid, SnapshotPaths};
use crate::baseline::BaselineResult;
use crate::config::AppConfig;
use crate::pipeline::{
    compute_baseline, exit_codes, load_snapshot_with_context, output_report, Comparison,
};
use anyhow::Result;

/// Run the baseline command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_baseline(config: AppConfig, paths: SnapshotPaths) -> Result<i32> {
    ensure_valid(&config)?;
    let quiet = config.behavior.quiet;

    let newer = load_snapshot_with_context(&paths.newer, quiet)?;
    let older = paths
        .older
        .as_deref()
        .map(|path| load_snapshot_with_context(path, quiet))
        .transpose()?;
    if older.is_none() && !quiet {
        tracing::info!("No older snapshot given, baselining as a first release");
    }

    let comparison = Comparison::new(newer, older, &config.policy);
    let diff = comparison.diff()?;
    let result = compute_baseline(&config, &comparison, &diff)?;

    let exit_code = determine_exit_code(&config, &result);
    output_report(&config, &result, &paths.newer, paths.older.as_deref())?;
    Ok(exit_code)
}

/// Determine the exit code based on the result and config flags.
fn determine_exit_code(config: &AppConfig, result: &BaselineResult<'_>) -> i32 {
    if config.behavior.fail_on_mismatch && result.has_mismatch() {
        exit_codes::MISMATCH
    } else {
        exit_codes::SUCCESS
    }
}
