//! Pipeline orchestration for baseline operations.
//!
//! Shared load → build → diff → baseline → report logic, so CLI command
//! handlers stay thin.

mod baseline_stage;
mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use baseline_stage::compute_baseline;
pub use diff_stage::Comparison;
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::load_snapshot_with_context;
pub use report_stage::{output_diff_report, output_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a snapshot file
    #[error("Loading failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success: versions are consistent (or mismatches are not fatal)
    pub const SUCCESS: i32 = 0;
    /// A version mismatch was found with `--fail-on-mismatch`
    pub const MISMATCH: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
