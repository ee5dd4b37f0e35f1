//! Report generation for baseline and diff results.
//!
//! - Summary: console table of the component and its units
//! - JSON: structured data for programmatic integration

mod json;
mod summary;
mod tree;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use tree::render_diff;
pub use types::{is_changed, DiffNode, ReportConfig, ReportFormat, ReportMetadata};

use crate::baseline::BaselineResult;
use crate::diff::Diff;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a baseline result
    fn generate_baseline_report(
        &self,
        result: &BaselineResult<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report of a bare structural diff
    fn generate_diff_report(
        &self,
        diff: &Diff<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a baseline report to a writer
    fn write_baseline_report(
        &self,
        result: &BaselineResult<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_baseline_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
