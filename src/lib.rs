//! **Structural API diff and semantic version baselining.**
//!
//! `api-baseline` compares two releases of a component's public API, decides
//! how severe each change is under semantic versioning, and suggests the
//! version every exported unit (package) and the component itself should
//! declare. When the declared version is too low it explains why, down to the
//! added or removed member that caused the bump.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the immutable, sorted [`Element`] tree of one release, the
//!   [`Delta`] severity scale and the [`Version`] type.
//! - **[`policy`]**: turns the structural facts of a [`Snapshot`] into an
//!   element tree, assigning add/remove severities per member kind and
//!   interface role (provider or consumer).
//! - **[`diff`]**: matches two trees into a [`Diff`] and folds child severities
//!   into their parents; a [`Reclassify`] hook re-folds without rebuilding.
//! - **[`baseline`]**: per-unit and component version suggestions, mismatch
//!   detection and provider-type remediation hints.
//! - **[`reports`]**: console and JSON renderings of results.
//! - **[`pipeline`]** and **[`cli`]**: file loading and command handlers.
//!
//! ## Baselining Two Snapshots
//!
//! ```no_run
//! use std::path::Path;
//! use api_baseline::{Baseliner, Diff, PolicyConfig, Snapshot};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let policy = PolicyConfig::default();
//!     let newer = Snapshot::load(Path::new("path/to/new.json"))?;
//!     let older = Snapshot::load(Path::new("path/to/old.json"))?;
//!     let newer_tree = newer.to_element(&policy);
//!     let older_tree = older.to_element(&policy);
//!
//!     let diff = Diff::new(&newer_tree, &older_tree)?;
//!     let older_metadata = older.metadata();
//!     let result = Baseliner::default().baseline(&diff, &newer.metadata(), Some(&older_metadata));
//!
//!     for unit in result.units.iter().filter(|unit| unit.mismatch) {
//!         println!("{} should be {:?}", unit.name, unit.suggested_version);
//!         for line in &unit.reason {
//!             println!("  {line}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Output config legitimately carries several toggle flags
    clippy::struct_excessive_bools,
    // Variable names like `newer`/`older` are clear in context
    clippy::similar_names
)]

pub mod baseline;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod reports;
pub mod snapshot;
pub mod utils;

// Re-export main types for convenience
pub use baseline::{
    BaselineOptions, BaselineResult, Baseliner, ComponentMetadata, ExportedUnitInfo, PathIgnore,
    UnitFilter, UnitMetadata,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, PolicyConfig, Validatable};
pub use diff::{explain, root_cause, Diff, FirstMatch, IgnoreIf, NoReclassify, Reclassify};
pub use error::{BaselineError, ErrorContext, Result};
pub use model::{Delta, Element, ElementBuilder, ElementKind, StructureError, Version};
pub use policy::ApiBuilder;
pub use reports::{ReportFormat, ReportGenerator};
pub use snapshot::Snapshot;
