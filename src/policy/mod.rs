//! Compatibility policy.
//!
//! Decides which severity applies when a node exists on only one side:
//! provider and consumer interfaces, access markers, inheritance edges and
//! value leaves. [`ApiBuilder`] applies it while turning a snapshot's facts into
//! an element tree.

mod builder;
pub mod facts;
mod markers;
mod severity;

pub use crate::config::PolicyConfig;
pub use builder::{ApiBuilder, API_NODE, MANIFEST_NODE, PROVIDER_DIRECTIVE, RESOURCES_NODE};
pub use markers::{ignore_threshold, role_of};
pub use severity::{interface_method_severities, severities, AccessMarker, Role};
