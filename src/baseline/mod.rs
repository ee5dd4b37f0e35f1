//! Version baselining of components and their exported units.
//!
//! [`Baseliner`] walks the exported units of a component diff, applies the
//! configured path ignores and the ignore marker, and suggests the version
//! each unit and the whole component should declare.

mod bump;
mod engine;
mod filter;
mod metadata;
mod result;

pub use bump::{bump, component_bump, suggest, Suggestion};
pub use engine::{BaselineOptions, Baseliner};
pub use filter::{qualified_path, PathIgnore, UnitFilter};
pub use metadata::{ComponentMetadata, UnitMetadata};
pub use result::{BaselineResult, ExportedUnitInfo};
