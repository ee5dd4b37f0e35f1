//! Add/remove severity table.

use crate::model::{Delta, ElementKind};

/// Role of an interface, deciding who is hurt by new methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Implemented by the API owner; callers only consume it
    Provider,
    /// Implemented by external parties (the default)
    Consumer,
}

/// Access-flag markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMarker {
    Protected,
    Abstract,
    Final,
    Static,
}

impl AccessMarker {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protected => "protected",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Static => "static",
        }
    }

    /// `(add, remove)` for this marker on a member or type of the given role.
    #[must_use]
    pub const fn severities(self, role: Role) -> (Delta, Delta) {
        match (self, role) {
            (Self::Protected, Role::Consumer) => (Delta::Major, Delta::Minor),
            (Self::Protected, Role::Provider) => (Delta::Minor, Delta::Minor),
            (Self::Abstract | Self::Final, _) => (Delta::Major, Delta::Minor),
            (Self::Static, _) => (Delta::Major, Delta::Major),
        }
    }
}

/// Default `(add, remove)` severities per element kind.
///
/// Methods of interfaces are adjusted by [`interface_method_severities`].
#[must_use]
pub const fn severities(kind: ElementKind) -> (Delta, Delta) {
    match kind {
        ElementKind::Component | ElementKind::Api => (Delta::Minor, Delta::Major),
        ElementKind::Package => (Delta::Minor, Delta::Major),
        ElementKind::Class
        | ElementKind::Interface
        | ElementKind::Enum
        | ElementKind::AnnotationType => (Delta::Minor, Delta::Major),
        ElementKind::Method | ElementKind::Field => (Delta::Minor, Delta::Major),
        ElementKind::Extends => (Delta::Micro, Delta::Major),
        ElementKind::Implements => (Delta::Minor, Delta::Major),
        ElementKind::Return => (Delta::Minor, Delta::Major),
        // Access markers depend on the marker; see AccessMarker::severities
        ElementKind::Access => (Delta::Major, Delta::Minor),
        ElementKind::Annotation
        | ElementKind::Property
        | ElementKind::Constant
        | ElementKind::Default => (Delta::Changed, Delta::Changed),
        ElementKind::Version => (Delta::Ignored, Delta::Ignored),
        ElementKind::Resources
        | ElementKind::Resource
        | ElementKind::Digest
        | ElementKind::Manifest
        | ElementKind::Header
        | ElementKind::Clause
        | ElementKind::Parameter => (Delta::Changed, Delta::Changed),
    }
}

/// Severities of a method declared on an interface.
///
/// A method with a body (or an annotation member with a default) can be added
/// without breaking implementers.
#[must_use]
pub const fn interface_method_severities(role: Role, has_default: bool) -> (Delta, Delta) {
    let add = match role {
        _ if has_default => Delta::Minor,
        Role::Provider => Delta::Minor,
        Role::Consumer => Delta::Major,
    };
    (add, Delta::Major)
}
