//! Configuration types for api-baseline.

use super::defaults::{
    DEFAULT_CONSUMER_ANNOTATION, DEFAULT_IGNORE_ANNOTATION, DEFAULT_PARALLEL_THRESHOLD,
    DEFAULT_PROVIDER_ANNOTATION, DEFAULT_RESERVED_PREFIX, DEFAULT_ROOT_TYPE,
};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Which units take part and which paths are ignored
    pub baseline: BaselineConfig,
    /// Marker annotations and the root type
    pub policy: PolicyConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Add a unit filter instruction (`!` negates).
    pub fn unit(mut self, instruction: impl Into<String>) -> Self {
        self.config.baseline.units.push(instruction.into());
        self
    }

    /// Add an ignored path glob.
    pub fn ignore(mut self, glob: impl Into<String>) -> Self {
        self.config.baseline.ignore.push(glob.into());
        self
    }

    /// Replace the reserved unit prefixes.
    pub fn reserved_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.config.baseline.reserved_prefixes = prefixes;
        self
    }

    /// Unit count above which units are evaluated in parallel.
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.baseline.parallel_threshold = threshold;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Exit with code 1 on a version mismatch.
    pub const fn fail_on_mismatch(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_mismatch = fail;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Unit selection and ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BaselineConfig {
    /// Ordered unit instructions, e.g. `["!com.example.internal.*", "com.example.*"]`.
    /// Empty selects every unit.
    pub units: Vec<String>,
    /// Globs over qualified paths (`p`, `p.Type`, `p.Type#member`) to ignore
    pub ignore: Vec<String>,
    /// Units whose names start with one of these prefixes are never baselined
    pub reserved_prefixes: Vec<String>,
    /// Evaluate units in parallel above this many units
    pub parallel_threshold: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            ignore: Vec::new(),
            reserved_prefixes: vec![DEFAULT_RESERVED_PREFIX.to_string()],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Names the policy recognizes in the snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PolicyConfig {
    /// Annotation marking an interface as implemented by the API owner
    pub provider_annotation: String,
    /// Annotation forcing an interface to be treated as a consumer type
    pub consumer_annotation: String,
    /// Annotation with a `value` version below which changes are ignored
    pub ignore_annotation: String,
    /// Implicit supertype of every class
    pub root_type: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            provider_annotation: DEFAULT_PROVIDER_ANNOTATION.to_string(),
            consumer_annotation: DEFAULT_CONSUMER_ANNOTATION.to_string(),
            ignore_annotation: DEFAULT_IGNORE_ANNOTATION.to_string(),
            root_type: DEFAULT_ROOT_TYPE.to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// List unchanged units too
    pub show_all: bool,
    /// Include the changed nodes of the diff tree
    pub show_diff: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if the component or a unit mismatches
    pub fail_on_mismatch: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
