//! Structural diff engine.
//!
//! Two element trees are matched by `(kind, name)` with a merge-join over their
//! sorted children. Each resulting [`Diff`] node memoizes its folded severity;
//! callers that need a different view (ignored paths, reclassified interfaces)
//! re-fold through a [`Reclassify`] hook without rebuilding the tree.
//!
//! ```ignore
//! use api_baseline::diff::{Diff, root_cause};
//!
//! let diff = Diff::new(&newer, &older)?;
//! println!("{}", diff.delta());
//! for line in root_cause(&diff) {
//!     println!("  {line}");
//! }
//! ```

mod engine;
mod root_cause;

pub use engine::{Diff, FirstMatch, IgnoreIf, NoReclassify, Reclassify};
pub use root_cause::{explain, root_cause};
