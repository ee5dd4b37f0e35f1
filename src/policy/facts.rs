//! Structural facts handed over by an extractor.
//!
//! These types describe what a compiled type exposes, without any
//! compatibility policy attached. [`ApiBuilder`](super::ApiBuilder) turns them
//! into element trees.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declared visibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// Public and protected declarations are part of the API.
    #[must_use]
    pub const fn is_exposed(self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

/// Access flags of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Modifiers {
    pub visibility: Visibility,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "synthetic")]
    pub is_synthetic: bool,
}

/// Kind of a class-like type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
}

/// An annotation instance and its explicit values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotationFacts {
    /// Fully qualified annotation type
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub values: IndexMap<String, String>,
}

impl AnnotationFacts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }
}

fn void() -> String {
    "void".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MethodFacts {
    pub name: String,
    /// Parameter types in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default = "void")]
    pub return_type: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Interface method with a concrete body
    #[serde(default)]
    pub default_body: bool,
    /// Default value of an annotation member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationFacts>,
}

impl MethodFacts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: void(),
            modifiers: Modifiers::default(),
            default_body: false,
            default_value: None,
            annotations: Vec::new(),
        }
    }

    /// `name(type1,type2)`, the method's element name.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldFacts {
    pub name: String,
    pub field_type: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Compile-time constant value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationFacts>,
}

impl FieldFacts {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            modifiers: Modifiers::default(),
            constant: None,
            annotations: Vec::new(),
        }
    }

    /// `type name`, the field's element name.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{} {}", self.field_type, self.name)
    }
}

/// Everything known about one class-like type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeFacts {
    /// Fully qualified name, e.g. `com.example.api.Service`
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodFacts>,
    #[serde(default)]
    pub fields: Vec<FieldFacts>,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
}

impl TypeFacts {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::default(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Package part of the name; empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Name without the package.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit_once('.').map_or(&self.name, |(_, short)| short)
    }

    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::AnnotationType)
    }

    #[must_use]
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }
}

/// One clause of a manifest header, e.g. `p;version="1.0.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeaderClause {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, String>,
}
