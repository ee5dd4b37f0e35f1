//! Report output stage.

use super::{should_use_color, write_output, OutputTarget, PipelineError};
use crate::baseline::BaselineResult;
use crate::config::AppConfig;
use crate::diff::Diff;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;
use std::path::Path;

fn report_config(config: &AppConfig, newer: &Path, older: Option<&Path>) -> ReportConfig {
    ReportConfig {
        show_all: config.output.show_all,
        show_diff: config.output.show_diff,
        metadata: ReportMetadata {
            newer_path: Some(newer.to_string_lossy().to_string()),
            older_path: older.map(|path| path.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
    }
}

/// Output a baseline report to the configured destination.
pub fn output_report(
    config: &AppConfig,
    result: &BaselineResult<'_>,
    newer: &Path,
    older: Option<&Path>,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter =
        create_reporter_with_options(config.output.format, should_use_color(&target, false));
    let report = reporter
        .generate_baseline_report(result, &report_config(config, newer, older))
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&report, &target, config.behavior.quiet)
}

/// Output a bare diff report to the configured destination.
pub fn output_diff_report(
    config: &AppConfig,
    diff: &Diff<'_>,
    newer: &Path,
    older: &Path,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter =
        create_reporter_with_options(config.output.format, should_use_color(&target, false));
    let report = reporter
        .generate_diff_report(diff, &report_config(config, newer, Some(older)))
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&report, &target, config.behavior.quiet)
}
