//! Turns a snapshot's facts into a policy-decorated element tree.

use super::facts::{
    AnnotationFacts, FieldFacts, MethodFacts, Modifiers, TypeFacts, TypeKind, Visibility,
};
use super::markers::role_of;
use super::severity::{interface_method_severities, severities, AccessMarker, Role};
use super::PolicyConfig;
use crate::model::{Delta, Element, ElementBuilder, ElementKind, Version};
use crate::snapshot::{Snapshot, UnitFacts};
use crate::utils::compile_glob_list;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Unit attribute listing provider interfaces as comma-separated globs.
pub const PROVIDER_DIRECTIVE: &str = "provider-type";

/// Name of the node grouping the exported units.
pub const API_NODE: &str = "<api>";
/// Name of the node grouping resources.
pub const RESOURCES_NODE: &str = "<resources>";
/// Name of the node grouping manifest headers.
pub const MANIFEST_NODE: &str = "<manifest>";

/// Headers that change on every build.
const IGNORED_HEADERS: [&str; 3] = ["Tool", "Bnd-LastModified", "Created-By"];

const ROOT_MEMBERS_EXCLUDED: [&str; 3] = ["getClass()", "notify()", "notifyAll()"];

/// Builder with default severities for `kind`.
fn node(kind: ElementKind, name: impl Into<String>) -> ElementBuilder {
    let (add, remove) = severities(kind);
    Element::builder(kind, name).severities(add, remove)
}

const fn element_kind(kind: TypeKind) -> ElementKind {
    match kind {
        TypeKind::Class => ElementKind::Class,
        TypeKind::Interface => ElementKind::Interface,
        TypeKind::Enum => ElementKind::Enum,
        TypeKind::AnnotationType => ElementKind::AnnotationType,
    }
}

/// Builds the element tree of one snapshot.
///
/// Flattened type elements, covariant return chains and the inheritable root
/// members are cached on the builder, so one builder serves exactly one
/// snapshot and nothing is shared between comparisons.
pub struct ApiBuilder<'s> {
    config: &'s PolicyConfig,
    snapshot: &'s Snapshot,
    space: HashMap<&'s str, &'s TypeFacts>,
    provider_globs: HashMap<&'s str, Vec<Regex>>,
    types: HashMap<String, Element>,
    returns: HashMap<String, Vec<String>>,
    root_members: Option<Vec<Element>>,
    loading: HashSet<String>,
}

impl<'s> ApiBuilder<'s> {
    pub fn new(config: &'s PolicyConfig, snapshot: &'s Snapshot) -> Self {
        let space = snapshot
            .types
            .iter()
            .map(|facts| (facts.name.as_str(), facts))
            .collect();

        let mut provider_globs = HashMap::new();
        for unit in &snapshot.units {
            let Some(directive) = unit.attributes.get(PROVIDER_DIRECTIVE) else {
                continue;
            };
            match compile_glob_list(directive) {
                Ok(globs) => {
                    provider_globs.insert(unit.name.as_str(), globs);
                }
                Err(e) => {
                    tracing::warn!(unit = %unit.name, "ignoring provider directive: {e}");
                }
            }
        }

        Self {
            config,
            snapshot,
            space,
            provider_globs,
            types: HashMap::new(),
            returns: HashMap::new(),
            root_members: None,
            loading: HashSet::new(),
        }
    }

    /// Build the component tree: `<api>` with one package per unit, then
    /// `<resources>` and `<manifest>`.
    #[must_use]
    pub fn build(mut self) -> Element {
        let snapshot = self.snapshot;

        let mut api = node(ElementKind::Api, API_NODE);
        for unit in &snapshot.units {
            api.push(self.unit_element(unit));
        }

        let element = node(ElementKind::Component, snapshot.identity.clone())
            .child(api.build())
            .child(self.resources_element())
            .child(self.manifest_element())
            .build();

        tracing::debug!(
            identity = %snapshot.identity,
            types = self.types.len(),
            nodes = element.size(),
            "built element tree"
        );
        element
    }

    fn unit_element(&mut self, unit: &'s UnitFacts) -> Element {
        let version = Version::parse_lenient(unit.version.as_deref()).without_qualifier();
        let mut package = node(ElementKind::Package, unit.name.clone()).child(
            node(ElementKind::Version, version.to_string())
                .severities(Delta::Ignored, Delta::Ignored)
                .build(),
        );

        let snapshot = self.snapshot;
        let exported = snapshot.types.iter().filter(|facts| {
            facts.package() == unit.name && facts.modifiers.visibility.is_exposed()
        });
        for facts in exported {
            if let Some(element) = self.type_element(&facts.name) {
                package.push(element);
            }
        }
        package.build()
    }

    /// Flattened element of a type in the class space.
    ///
    /// Returns `None` when the type is missing or already being built further
    /// up a cyclic hierarchy.
    fn type_element(&mut self, name: &str) -> Option<Element> {
        if let Some(cached) = self.types.get(name) {
            return Some(cached.clone());
        }
        let facts = *self.space.get(name)?;
        if !self.loading.insert(name.to_string()) {
            tracing::warn!(type_name = name, "cyclic type hierarchy");
            return None;
        }
        let element = self.build_type(facts);
        self.loading.remove(name);
        self.types.insert(name.to_string(), element.clone());
        Some(element)
    }

    fn build_type(&mut self, facts: &'s TypeFacts) -> Element {
        let kind = element_kind(facts.kind);
        let interface = facts.is_interface();
        let role = if interface {
            let globs = self
                .provider_globs
                .get(facts.package())
                .map_or(&[][..], Vec::as_slice);
            role_of(facts, globs, self.config)
        } else {
            Role::Consumer
        };
        let final_class = !interface && facts.modifiers.is_final;

        let mut builder = node(kind, facts.name.clone());

        // Inherited members go in first so declared ones replace them
        let mut unloadable = Vec::new();
        for supertype in supertypes(facts) {
            if supertype == self.config.root_type {
                builder = builder.children(self.root_members());
                continue;
            }
            match self.type_element(supertype) {
                Some(parent) => {
                    builder = builder.children(
                        parent
                            .children()
                            .iter()
                            .filter(|child| is_inheritable(child))
                            .cloned(),
                    );
                }
                None => {
                    tracing::warn!(type_name = %facts.name, supertype, "cannot load supertype");
                    unloadable.push(format!("Cannot load {supertype}"));
                }
            }
        }
        if !unloadable.is_empty() {
            builder = builder.comment(unloadable.join("; "));
        }

        if let Some(superclass) = facts.superclass.as_deref() {
            if superclass != self.config.root_type && !self.is_hidden(superclass) {
                let edge_kind = if interface {
                    ElementKind::Implements
                } else {
                    ElementKind::Extends
                };
                let (add, remove) = severities(edge_kind);
                builder.push(
                    Element::builder(ElementKind::Extends, superclass)
                        .severities(add, remove)
                        .build(),
                );
            }
        }
        for implemented in &facts.interfaces {
            builder.push(node(ElementKind::Implements, implemented.clone()).build());
        }

        builder = builder
            .children(access_markers(&facts.modifiers, role, interface, false))
            .children(facts.annotations.iter().map(annotation_element));

        let (synthetic, declared): (Vec<&MethodFacts>, Vec<&MethodFacts>) = facts
            .methods
            .iter()
            .filter(|method| method.modifiers.visibility.is_exposed())
            .partition(|method| method.modifiers.is_synthetic);

        let mut bridges: HashMap<String, Vec<&MethodFacts>> = HashMap::new();
        for method in synthetic {
            let signature = method.signature();
            if declared.iter().any(|d| d.signature() == signature) {
                bridges.entry(signature).or_default().push(method);
            } else {
                let element =
                    self.method_element(facts, method, role, final_class, &[], Some("synthetic"));
                builder.push(element);
            }
        }
        for method in declared {
            let bridged = bridges
                .get(&method.signature())
                .map_or(&[][..], Vec::as_slice);
            let element = self.method_element(facts, method, role, final_class, bridged, None);
            builder.push(element);
        }

        for field in facts.fields.iter().filter(|f| f.modifiers.visibility.is_exposed()) {
            builder.push(field_element(field, role, interface, final_class));
        }

        builder.build()
    }

    fn method_element(
        &mut self,
        owner: &TypeFacts,
        method: &MethodFacts,
        role: Role,
        final_class: bool,
        bridges: &[&MethodFacts],
        comment: Option<&str>,
    ) -> Element {
        let interface = owner.is_interface();
        let (add, remove) = if interface {
            let has_default = method.default_body || method.default_value.is_some();
            interface_method_severities(role, has_default)
        } else {
            severities(ElementKind::Method)
        };

        let mut builder = Element::builder(ElementKind::Method, method.signature())
            .severities(add, remove)
            .maybe_comment(comment.map(str::to_string))
            .children(access_markers(&method.modifiers, role, interface, final_class))
            .children(method.annotations.iter().map(annotation_element));

        let return_types = std::iter::once(method)
            .chain(bridges.iter().copied())
            .map(|m| m.return_type.clone())
            .collect::<Vec<_>>();
        for return_type in return_types {
            for name in self.returns(&return_type) {
                builder.push(node(ElementKind::Return, name).build());
            }
        }

        if let Some(default) = &method.default_value {
            builder.push(node(ElementKind::Default, default.clone()).build());
        }
        builder.build()
    }

    /// Return type plus its supertypes found in the class space.
    fn returns(&mut self, type_name: &str) -> Vec<String> {
        if let Some(cached) = self.returns.get(type_name) {
            return cached.clone();
        }

        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![type_name.to_string()];
        while let Some(name) = pending.pop() {
            if name == "void" || name == self.config.root_type || !seen.insert(name.clone()) {
                continue;
            }
            if let Some(facts) = self.space.get(name.as_str()) {
                pending.extend(
                    facts
                        .superclass
                        .iter()
                        .chain(&facts.interfaces)
                        .filter(|s| self.space.contains_key(s.as_str()))
                        .cloned(),
                );
            }
            chain.push(name);
        }

        self.returns.insert(type_name.to_string(), chain.clone());
        chain
    }

    /// Members every type inherits from the root type.
    fn root_members(&mut self) -> Vec<Element> {
        if let Some(members) = &self.root_members {
            return members.clone();
        }
        let root = self.config.root_type.clone();
        let members: Vec<Element> = self
            .type_element(&root)
            .map(|element| {
                element
                    .children()
                    .iter()
                    .filter(|child| {
                        child.kind().is_member()
                            && is_inheritable(child)
                            && !is_excluded_root_member(child.name())
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        self.root_members = Some(members.clone());
        members
    }

    /// A non-public type present in the class space.
    fn is_hidden(&self, name: &str) -> bool {
        self.space
            .get(name)
            .is_some_and(|facts| !facts.modifiers.visibility.is_exposed())
    }

    fn resources_element(&self) -> Element {
        let mut resources = node(ElementKind::Resources, RESOURCES_NODE);
        for (path, digest) in &self.snapshot.resources {
            resources.push(
                node(ElementKind::Resource, path.clone())
                    .child(node(ElementKind::Digest, digest.clone()).build())
                    .build(),
            );
        }
        resources.build()
    }

    fn manifest_element(&self) -> Element {
        let mut manifest = node(ElementKind::Manifest, MANIFEST_NODE);
        for (name, clauses) in &self.snapshot.headers {
            if IGNORED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name)) {
                continue;
            }
            let header = node(ElementKind::Header, name.clone()).children(clauses.iter().map(
                |clause| {
                    node(ElementKind::Clause, clause.name.clone())
                        .children(clause.parameters.iter().map(|(key, value)| {
                            node(ElementKind::Parameter, format!("{key}={value}")).build()
                        }))
                        .build()
                },
            ));
            manifest.push(header.build());
        }
        manifest.build()
    }
}

/// Supertypes whose members are inherited.
fn supertypes(facts: &TypeFacts) -> Vec<&str> {
    let mut supers = Vec::new();
    if !facts.is_interface() {
        supers.extend(facts.superclass.as_deref());
    }
    if facts.is_interface() || facts.modifiers.is_abstract {
        supers.extend(facts.interfaces.iter().map(String::as_str));
    }
    supers
}

fn is_inheritable(child: &Element) -> bool {
    matches!(
        child.kind(),
        ElementKind::Method | ElementKind::Field | ElementKind::Extends | ElementKind::Implements
    ) && !child.name().starts_with('<')
        && child
            .find(ElementKind::Access, AccessMarker::Static.label())
            .is_none()
}

fn is_excluded_root_member(name: &str) -> bool {
    name.starts_with('<') || name.starts_with("wait(") || ROOT_MEMBERS_EXCLUDED.contains(&name)
}

fn access_markers(
    modifiers: &Modifiers,
    role: Role,
    in_interface: bool,
    final_owner: bool,
) -> Vec<Element> {
    let mut markers = Vec::new();
    if modifiers.visibility == Visibility::Protected {
        markers.push(AccessMarker::Protected);
    }
    if modifiers.is_abstract && !in_interface && !final_owner {
        markers.push(AccessMarker::Abstract);
    }
    if modifiers.is_final && !final_owner {
        markers.push(AccessMarker::Final);
    }
    if modifiers.is_static {
        markers.push(AccessMarker::Static);
    }

    markers
        .into_iter()
        .map(|marker| {
            let (add, remove) = marker.severities(role);
            Element::builder(ElementKind::Access, marker.label())
                .severities(add, remove)
                .build()
        })
        .collect()
}

fn field_element(field: &FieldFacts, role: Role, in_interface: bool, final_owner: bool) -> Element {
    let mut builder = node(ElementKind::Field, field.signature())
        .children(access_markers(&field.modifiers, role, in_interface, final_owner))
        .children(field.annotations.iter().map(annotation_element));
    if let Some(constant) = &field.constant {
        builder.push(node(ElementKind::Constant, constant.clone()).build());
    }
    builder.build()
}

fn annotation_element(annotation: &AnnotationFacts) -> Element {
    node(ElementKind::Annotation, annotation.name.clone())
        .children(
            annotation
                .values
                .iter()
                .map(|(key, value)| node(ElementKind::Property, format!("{key}={value}")).build()),
        )
        .build()
}
