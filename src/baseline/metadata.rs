//! Declared version metadata of one side.

use crate::model::Version;
use indexmap::IndexMap;
use serde::Serialize;

/// Declared version and attributes of an exported unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitMetadata {
    pub version: Version,
    pub attributes: IndexMap<String, String>,
}

impl UnitMetadata {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            attributes: IndexMap::new(),
        }
    }
}

/// Declared identity, version and units of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentMetadata {
    pub identity: String,
    pub version: Version,
    pub units: IndexMap<String, UnitMetadata>,
}

impl ComponentMetadata {
    pub fn new(identity: impl Into<String>, version: Version) -> Self {
        Self {
            identity: identity.into(),
            version,
            units: IndexMap::new(),
        }
    }

    /// Add a unit, replacing any previous one with the same name.
    #[must_use]
    pub fn with_unit(mut self, name: impl Into<String>, unit: UnitMetadata) -> Self {
        self.units.insert(name.into(), unit);
        self
    }

    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&UnitMetadata> {
        self.units.get(name)
    }
}
