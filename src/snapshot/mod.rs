//! Serialized structural snapshots.
//!
//! A snapshot carries what an extractor found in one release of a component:
//! its identity and declared version, the exported units with their versions
//! and attributes, the type facts of the class space, resource digests and
//! pre-split manifest headers.
//!
//! ```json
//! {
//!   "identity": "com.example.api",
//!   "version": "1.0.0",
//!   "units": [{"name": "p", "version": "1.0.0", "attributes": {"provider-type": "I*"}}],
//!   "types": [{"name": "p.C", "kind": "class", "superclass": "java.lang.Object",
//!              "methods": [{"name": "m"}]}],
//!   "resources": {"p/C.class": "ab12"},
//!   "headers": {"Export-Package": [{"name": "p", "parameters": {"version": "1.0.0"}}]}
//! }
//! ```

use crate::baseline::{ComponentMetadata, UnitMetadata};
use crate::config::PolicyConfig;
use crate::error::{BaselineError, ErrorContext, Result, SnapshotErrorKind};
use crate::model::{Element, Version};
use crate::policy::facts::{HeaderClause, TypeFacts};
use crate::policy::ApiBuilder;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// An exported unit with its declared version and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnitFacts {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    /// Component identity (symbolic name)
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitFacts>,
    /// Class space: exported types and the supertypes they depend on
    #[serde(default)]
    pub types: Vec<TypeFacts>,
    /// Resource path to content digest
    #[serde(default)]
    pub resources: IndexMap<String, String>,
    /// Header name to its parsed clauses
    #[serde(default)]
    pub headers: IndexMap<String, Vec<HeaderClause>>,
}

impl Snapshot {
    /// Parse and validate a snapshot from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read, parse and validate a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BaselineError::io(path, e))?;
        let snapshot = Self::from_json(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            identity = %snapshot.identity,
            units = snapshot.units.len(),
            types = snapshot.types.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Reject snapshots the policy cannot build a consistent tree from.
    pub fn validate(&self) -> Result<()> {
        if self.identity.trim().is_empty() {
            return Err(BaselineError::missing_field("identity", "snapshot"));
        }

        let mut units = HashSet::new();
        for unit in &self.units {
            if !units.insert(unit.name.as_str()) {
                return Err(duplicate("unit", &unit.name));
            }
        }

        let mut types = HashSet::new();
        for facts in &self.types {
            if !types.insert(facts.name.as_str()) {
                return Err(duplicate("type", &facts.name));
            }
        }
        Ok(())
    }

    /// Declared versions and attributes.
    #[must_use]
    pub fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata {
            identity: self.identity.clone(),
            version: Version::parse_lenient(self.version.as_deref()),
            units: self
                .units
                .iter()
                .map(|unit| {
                    (
                        unit.name.clone(),
                        UnitMetadata {
                            version: Version::parse_lenient(unit.version.as_deref()),
                            attributes: unit.attributes.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Policy-decorated element tree of this snapshot.
    #[must_use]
    pub fn to_element(&self, policy: &PolicyConfig) -> Element {
        ApiBuilder::new(policy, self).build()
    }
}

fn duplicate(what: &str, name: &str) -> BaselineError {
    BaselineError::snapshot(
        "validating snapshot",
        SnapshotErrorKind::Duplicate {
            what: what.to_string(),
            name: name.to_string(),
        },
    )
}
