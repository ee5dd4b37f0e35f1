//! Structural snapshot model.
//!
//! Both sides of a comparison are described by an [`Element`] tree. Nodes carry
//! the severities that apply when they only exist on one side; [`Delta`] is the
//! ordinal severity scale shared by the diff engine and the baseline algorithm,
//! and [`Version`] is the declared version of components and exported units.

mod delta;
mod element;
mod version;

pub use delta::Delta;
pub use element::{Element, ElementBuilder, ElementKind, StructureError};
pub(crate) use element::check_order;
pub use version::{Version, VersionParseError};
