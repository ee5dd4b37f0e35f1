//! Unified error types for api-baseline.
//!
//! Only structural invariant violations and I/O or snapshot decoding failures
//! are errors. Everything the baseline algorithm can recover from is reported
//! as a warning on the result instead.

use crate::model::StructureError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for api-baseline operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BaselineError {
    /// A supplied element tree violates sibling ordering or uniqueness
    #[error("Malformed element tree: {context}")]
    Structure {
        context: String,
        #[source]
        source: StructureError,
    },

    /// Errors while decoding a snapshot
    #[error("Failed to load snapshot: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Errors while rendering a report
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific snapshot error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Duplicate {what} '{name}'")]
    Duplicate { what: String, name: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Formatting failed: {0}")]
    Format(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for api-baseline operations
pub type Result<T> = std::result::Result<T, BaselineError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BaselineError {
    /// Create a snapshot error with context
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }

    /// Create a snapshot error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::snapshot(
            "missing required field",
            SnapshotErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a structure error with context
    pub fn structure(context: impl Into<String>, source: StructureError) -> Self {
        Self::Structure {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BaselineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BaselineError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot(
            "JSON deserialization",
            SnapshotErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<crate::reports::ReportError> for BaselineError {
    fn from(err: crate::reports::ReportError) -> Self {
        use crate::reports::ReportError;
        match err {
            ReportError::IoError(e) => e.into(),
            ReportError::SerializationError(message) => Self::report(
                "generating report",
                ReportErrorKind::JsonSerializationError(message),
            ),
            ReportError::FormatError(e) => {
                Self::report("generating report", ReportErrorKind::Format(e.to_string()))
            }
        }
    }
}

impl From<StructureError> for BaselineError {
    fn from(err: StructureError) -> Self {
        Self::structure(String::new(), err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost first, so an error surfacing from a nested
/// call reads `"loading newer: parsing snapshot: ..."`.
///
/// ```ignore
/// use api_baseline::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Snapshot> {
///     let content = std::fs::read_to_string(path).context("reading snapshot file")?;
///     Snapshot::from_json(&content).with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BaselineError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: BaselineError, new_ctx: &str) -> BaselineError {
    match err {
        BaselineError::Structure {
            context: existing,
            source,
        } => BaselineError::Structure {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BaselineError::Snapshot {
            context: existing,
            source,
        } => BaselineError::Snapshot {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BaselineError::Report {
            context: existing,
            source,
        } => BaselineError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BaselineError::Io {
            path,
            message,
            source,
        } => BaselineError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        BaselineError::Config(msg) => BaselineError::Config(chain_context(new_ctx, &msg)),
        BaselineError::Validation(msg) => BaselineError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BaselineError::missing_field("identity", "snapshot");
        let display = err.to_string();
        assert!(display.contains("snapshot"), "{display}");

        let structure = StructureError::DuplicateSibling {
            parent: "class p.C".into(),
            sibling: "method m()".into(),
        };
        let err = BaselineError::structure("building newer", structure);
        assert!(err.to_string().contains("building newer"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("duplicate sibling method m() under class p.C")
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = BaselineError::io("/path/to/newer.json", io_err);
        assert!(err.to_string().contains("/path/to/newer.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(BaselineError::snapshot(
                "base",
                SnapshotErrorKind::InvalidJson("eof".into()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(BaselineError::Snapshot { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Snapshot error, got {other:?}"),
        }
    }

    #[test]
    fn test_structure_error_converts_without_context() {
        let structure = StructureError::Unsorted {
            parent: "package p".into(),
            previous: "class p.B".into(),
            next: "class p.A".into(),
        };
        let result: std::result::Result<(), StructureError> = Err(structure);
        match result.context("diffing") {
            Err(BaselineError::Structure { context, .. }) => assert_eq!(context, "diffing"),
            other => panic!("Expected Structure error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(BaselineError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
