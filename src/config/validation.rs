//! Configuration validation for api-baseline.

use super::types::{AppConfig, BaselineConfig, BehaviorConfig, OutputConfig, PolicyConfig};
use crate::utils::compile_glob;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.baseline.validate());
        errors.extend(self.policy.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for BaselineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (index, instruction) in self.units.iter().enumerate() {
            let pattern = instruction.strip_prefix('!').unwrap_or(instruction);
            if pattern.is_empty() {
                errors.push(ConfigError::new(
                    format!("baseline.units[{index}]"),
                    "Empty unit instruction",
                ));
            } else if let Err(e) = compile_glob(pattern) {
                errors.push(ConfigError::new(format!("baseline.units[{index}]"), e));
            }
        }

        for (index, glob) in self.ignore.iter().enumerate() {
            if let Err(e) = compile_glob(glob) {
                errors.push(ConfigError::new(format!("baseline.ignore[{index}]"), e));
            }
        }

        if self.reserved_prefixes.iter().any(String::is_empty) {
            errors.push(ConfigError::new(
                "baseline.reserved_prefixes",
                "Empty prefix would reserve every unit",
            ));
        }

        if self.parallel_threshold == 0 {
            errors.push(ConfigError::new(
                "baseline.parallel_threshold",
                "Threshold must be greater than 0",
            ));
        }

        errors
    }
}

impl Validatable for PolicyConfig {
    fn validate(&self) -> Vec<ConfigError> {
        [
            ("policy.provider_annotation", &self.provider_annotation),
            ("policy.consumer_annotation", &self.consumer_annotation),
            ("policy.ignore_annotation", &self.ignore_annotation),
            ("policy.root_type", &self.root_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ConfigError::new(field, "Name must not be empty"))
        .collect()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|file| file.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}
