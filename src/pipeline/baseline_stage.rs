//! Baseline computation stage.

use super::Comparison;
use crate::baseline::{BaselineOptions, BaselineResult, Baseliner};
use crate::config::AppConfig;
use crate::diff::Diff;
use anyhow::{Context, Result};

/// Baseline `diff` of `comparison` with the configured unit selection and
/// ignores.
pub fn compute_baseline<'d>(
    config: &AppConfig,
    comparison: &Comparison,
    diff: &'d Diff<'d>,
) -> Result<BaselineResult<'d>> {
    let options = BaselineOptions::from_config(&config.baseline, &config.policy)
        .context("Invalid baseline configuration")?;

    if !config.behavior.quiet {
        tracing::info!("Computing baseline...");
    }

    let older = comparison.older_metadata();
    let result =
        Baseliner::new(options).baseline(diff, &comparison.newer_metadata(), older.as_ref());

    if !config.behavior.quiet {
        tracing::info!(
            "Baselined {} units, {} mismatched",
            result.units.len(),
            result.units.iter().filter(|unit| unit.mismatch).count()
        );
    }
    Ok(result)
}
