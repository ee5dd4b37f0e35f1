//! Structural snapshot trees.
//!
//! An [`Element`] is one node of the tree describing a single side of a
//! comparison. Children are kept sorted by `(kind, name)` and are unique by that
//! key; the diff engine is a merge-join over those sorted sequences and silently
//! produces wrong results if the order is broken, so every constructor either
//! establishes the order itself ([`ElementBuilder`]) or verifies it
//! ([`Element::try_new`], deserialization).

use super::Delta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Closed set of node kinds.
///
/// Declaration order is the sort order of siblings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Unit of publication (tree root)
    Component,
    /// `<api>` grouping of exported units
    Api,
    /// Exported unit
    Package,
    Class,
    Interface,
    Enum,
    AnnotationType,
    Method,
    Field,
    Extends,
    Implements,
    /// Access-flag marker (`protected`, `abstract`, `final`, `static`)
    Access,
    /// Annotation instance
    Annotation,
    /// Annotation property, named `key=value`
    Property,
    /// Compile-time constant of a field
    Constant,
    /// Default value of an annotation member
    Default,
    /// Return-type marker
    Return,
    /// Declared version of an exported unit
    Version,
    /// `<resources>` grouping
    Resources,
    Resource,
    /// Content digest of a resource
    Digest,
    /// `<manifest>` grouping
    Manifest,
    Header,
    Clause,
    Parameter,
}

impl ElementKind {
    /// Class-like kinds.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::AnnotationType
        )
    }

    /// Methods and fields.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Method | Self::Field)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Api => "api",
            Self::Package => "package",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::AnnotationType => "annotation-type",
            Self::Method => "method",
            Self::Field => "field",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Access => "access",
            Self::Annotation => "annotation",
            Self::Property => "property",
            Self::Constant => "constant",
            Self::Default => "default",
            Self::Return => "return",
            Self::Version => "version",
            Self::Resources => "resources",
            Self::Resource => "resource",
            Self::Digest => "digest",
            Self::Manifest => "manifest",
            Self::Header => "header",
            Self::Clause => "clause",
            Self::Parameter => "parameter",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Violation of the structural invariants of an element tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructureError {
    #[error("children of {parent} are out of order: {previous} sorts after {next}")]
    Unsorted {
        parent: String,
        previous: String,
        next: String,
    },

    #[error("duplicate sibling {sibling} under {parent}")]
    DuplicateSibling { parent: String, sibling: String },

    #[error("{element} has non-ordinal {side} severity {delta}")]
    NonOrdinalSeverity {
        element: String,
        side: &'static str,
        delta: Delta,
    },
}

/// Check that `next` may follow `previous` among the children of `parent`.
pub(crate) fn check_order(
    parent: &Element,
    previous: &Element,
    next: &Element,
) -> Result<(), StructureError> {
    match previous.key().cmp(&next.key()) {
        Ordering::Less => Ok(()),
        Ordering::Equal => Err(StructureError::DuplicateSibling {
            parent: parent.describe(),
            sibling: next.describe(),
        }),
        Ordering::Greater => Err(StructureError::Unsorted {
            parent: parent.describe(),
            previous: previous.describe(),
            next: next.describe(),
        }),
    }
}

/// A node in a structural snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ElementRepr")]
pub struct Element {
    kind: ElementKind,
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
    add: Delta,
    remove: Delta,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl Element {
    /// Default severity when a generic element only exists in the newer tree.
    pub const DEFAULT_ADD: Delta = Delta::Minor;
    /// Default severity when a generic element only exists in the older tree.
    pub const DEFAULT_REMOVE: Delta = Delta::Major;

    /// Childless element with the default severities.
    pub fn leaf(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            children: Vec::new(),
            add: Self::DEFAULT_ADD,
            remove: Self::DEFAULT_REMOVE,
            comment: None,
        }
    }

    /// Start building an element from an unordered set of children.
    pub fn builder(kind: ElementKind, name: impl Into<String>) -> ElementBuilder {
        ElementBuilder {
            kind,
            name: name.into(),
            children: Vec::new(),
            add: Self::DEFAULT_ADD,
            remove: Self::DEFAULT_REMOVE,
            comment: None,
        }
    }

    /// Create an element from children that must already be sorted and unique.
    pub fn try_new(
        kind: ElementKind,
        name: impl Into<String>,
        children: Vec<Element>,
        add: Delta,
        remove: Delta,
        comment: Option<String>,
    ) -> Result<Self, StructureError> {
        let element = Self {
            kind,
            name: name.into(),
            children,
            add,
            remove,
            comment,
        };
        element.check_local()?;
        Ok(element)
    }

    /// Verify the invariants of this element and all of its descendants.
    pub fn validate(&self) -> Result<(), StructureError> {
        self.check_local()?;
        self.children.iter().try_for_each(Element::validate)
    }

    fn check_local(&self) -> Result<(), StructureError> {
        for (side, delta) in [("add", self.add), ("remove", self.remove)] {
            if !delta.is_ordinal() {
                return Err(StructureError::NonOrdinalSeverity {
                    element: self.describe(),
                    side,
                    delta,
                });
            }
        }
        self.children
            .windows(2)
            .try_for_each(|pair| check_order(self, &pair[0], &pair[1]))
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Severity when this element only exists in the newer tree.
    #[must_use]
    pub const fn add_severity(&self) -> Delta {
        self.add
    }

    /// Severity when this element only exists in the older tree.
    #[must_use]
    pub const fn remove_severity(&self) -> Delta {
        self.remove
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sort and identity key.
    #[must_use]
    pub fn key(&self) -> (ElementKind, &str) {
        (self.kind, self.name.as_str())
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a direct child by kind and name.
    #[must_use]
    pub fn find(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.children
            .binary_search_by(|child| child.key().cmp(&(kind, name)))
            .ok()
            .map(|index| &self.children[index])
    }

    /// First direct child with the given name, of any kind.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Direct children of one kind.
    pub fn children_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Element::size).sum::<usize>()
    }

    /// `kind name`, used in messages.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.kind, self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Accumulates children in any order, then sorts and freezes them once.
///
/// When two children share a `(kind, name)` key the one inserted last wins, so
/// declared members can replace inherited ones.
#[derive(Debug, Clone)]
#[must_use]
pub struct ElementBuilder {
    kind: ElementKind,
    name: String,
    children: Vec<Element>,
    add: Delta,
    remove: Delta,
    comment: Option<String>,
}

impl ElementBuilder {
    pub fn severities(mut self, add: Delta, remove: Delta) -> Self {
        debug_assert!(add.is_ordinal() && remove.is_ordinal());
        self.add = add;
        self.remove = remove;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn maybe_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add a child without consuming the builder.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Sort, deduplicate and freeze.
    #[must_use]
    pub fn build(self) -> Element {
        let mut children = self.children;
        children.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut frozen: Vec<Element> = Vec::with_capacity(children.len());
        for child in children {
            match frozen.last_mut() {
                Some(last) if last.key() == child.key() => *last = child,
                _ => frozen.push(child),
            }
        }

        Element {
            kind: self.kind,
            name: self.name,
            children: frozen,
            add: self.add,
            remove: self.remove,
            comment: self.comment,
        }
    }
}

#[derive(Deserialize)]
struct ElementRepr {
    kind: ElementKind,
    name: String,
    #[serde(default)]
    children: Vec<Element>,
    #[serde(default = "default_add")]
    add: Delta,
    #[serde(default = "default_remove")]
    remove: Delta,
    #[serde(default)]
    comment: Option<String>,
}

const fn default_add() -> Delta {
    Element::DEFAULT_ADD
}

const fn default_remove() -> Delta {
    Element::DEFAULT_REMOVE
}

impl TryFrom<ElementRepr> for Element {
    type Error = StructureError;

    fn try_from(repr: ElementRepr) -> Result<Self, Self::Error> {
        Element::try_new(
            repr.kind,
            repr.name,
            repr.children,
            repr.add,
            repr.remove,
            repr.comment,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_defaults() {
        let leaf = Element::leaf(ElementKind::Return, "int");
        assert_eq!(leaf.add_severity(), Delta::Minor);
        assert_eq!(leaf.remove_severity(), Delta::Major);
        assert!(leaf.is_leaf());
    }

    #[test]
    fn test_builder_sorts_by_kind_then_name() {
        let element = Element::builder(ElementKind::Class, "p.C")
            .child(Element::leaf(ElementKind::Field, "int b"))
            .child(Element::leaf(ElementKind::Method, "z()"))
            .child(Element::leaf(ElementKind::Method, "a()"))
            .build();

        let keys: Vec<_> = element.children().iter().map(Element::key).collect();
        assert_eq!(
            keys,
            vec![
                (ElementKind::Method, "a()"),
                (ElementKind::Method, "z()"),
                (ElementKind::Field, "int b"),
            ]
        );
        assert!(element.validate().is_ok());
    }

    #[test]
    fn test_builder_last_duplicate_wins() {
        let inherited = Element::builder(ElementKind::Method, "m()")
            .comment("inherited")
            .build();
        let declared = Element::builder(ElementKind::Method, "m()")
            .comment("declared")
            .build();
        let element = Element::builder(ElementKind::Class, "p.C")
            .child(inherited)
            .child(declared)
            .build();

        assert_eq!(element.children().len(), 1);
        assert_eq!(element.children()[0].comment(), Some("declared"));
    }

    #[test]
    fn test_try_new_rejects_unsorted() {
        let result = Element::try_new(
            ElementKind::Class,
            "p.C",
            vec![
                Element::leaf(ElementKind::Method, "b()"),
                Element::leaf(ElementKind::Method, "a()"),
            ],
            Delta::Minor,
            Delta::Major,
            None,
        );
        assert!(matches!(result, Err(StructureError::Unsorted { .. })));
    }

    #[test]
    fn test_try_new_rejects_duplicates() {
        let result = Element::try_new(
            ElementKind::Class,
            "p.C",
            vec![
                Element::leaf(ElementKind::Method, "a()"),
                Element::leaf(ElementKind::Method, "a()"),
            ],
            Delta::Minor,
            Delta::Major,
            None,
        );
        assert!(matches!(result, Err(StructureError::DuplicateSibling { .. })));
    }

    #[test]
    fn test_same_name_different_kind_is_allowed() {
        let result = Element::try_new(
            ElementKind::Package,
            "p",
            vec![
                Element::leaf(ElementKind::Class, "p.X"),
                Element::leaf(ElementKind::Interface, "p.X"),
            ],
            Delta::Minor,
            Delta::Major,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_non_ordinal_severity() {
        let result = Element::try_new(
            ElementKind::Field,
            "int f",
            Vec::new(),
            Delta::Added,
            Delta::Major,
            None,
        );
        assert!(matches!(
            result,
            Err(StructureError::NonOrdinalSeverity { side: "add", .. })
        ));
    }

    #[test]
    fn test_find_and_get() {
        let element = Element::builder(ElementKind::Class, "p.C")
            .child(Element::leaf(ElementKind::Method, "m()"))
            .child(Element::leaf(ElementKind::Field, "int f"))
            .build();
        assert!(element.find(ElementKind::Method, "m()").is_some());
        assert!(element.find(ElementKind::Field, "m()").is_none());
        assert_eq!(
            element.get("int f").map(Element::kind),
            Some(ElementKind::Field)
        );
        assert_eq!(element.size(), 3);
    }

    #[test]
    fn test_deserialize_validates_order() {
        let ok = r#"{"kind":"class","name":"p.C","children":[
            {"kind":"method","name":"a()"},{"kind":"method","name":"b()"}]}"#;
        let element: Element = serde_json::from_str(ok).expect("sorted tree");
        assert_eq!(element.children().len(), 2);
        assert_eq!(element.children()[0].add_severity(), Delta::Minor);

        let bad = r#"{"kind":"class","name":"p.C","children":[
            {"kind":"method","name":"b()"},{"kind":"method","name":"a()"}]}"#;
        let err = serde_json::from_str::<Element>(bad).expect_err("unsorted tree");
        assert!(err.to_string().contains("out of order"), "{err}");
    }

    #[test]
    fn test_serialize_round_trip() {
        let element = Element::builder(ElementKind::Interface, "p.I")
            .severities(Delta::Minor, Delta::Major)
            .child(Element::leaf(ElementKind::Method, "m()"))
            .build();
        let json = serde_json::to_string(&element).expect("serialize");
        let back: Element = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, element);
    }
}
