//! Annotations that steer the policy.
//!
//! Interfaces are classified through role markers and the unit's provider
//! directive. The ignore-below-version marker stays in the tree as an ordinary
//! annotation element and is read back during baselining.

use super::facts::TypeFacts;
use super::severity::Role;
use super::PolicyConfig;
use crate::model::{Element, ElementKind, Version, VersionParseError};
use regex::Regex;

/// Classify an interface.
///
/// A consumer marker always wins. Otherwise the provider marker or a short
/// name matching one of the unit's provider globs makes it a provider.
#[must_use]
pub fn role_of(facts: &TypeFacts, provider_globs: &[Regex], config: &PolicyConfig) -> Role {
    if facts.has_annotation(&config.consumer_annotation) {
        return Role::Consumer;
    }
    let short_name = facts.short_name();
    if facts.has_annotation(&config.provider_annotation)
        || provider_globs.iter().any(|glob| glob.is_match(short_name))
    {
        Role::Provider
    } else {
        Role::Consumer
    }
}

/// Threshold of the ignore marker carried by `element`, if any.
///
/// The marker is an `annotation` child named `annotation` with a
/// `value=<version>` property.
#[must_use]
pub fn ignore_threshold(
    element: &Element,
    annotation: &str,
) -> Option<Result<Version, VersionParseError>> {
    let marker = element.find(ElementKind::Annotation, annotation)?;
    let value = marker
        .children_of(ElementKind::Property)
        .find_map(|property| property.name().strip_prefix("value="))
        .unwrap_or_default();
    Some(value.parse())
}
