//! Configuration module for api-baseline.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use api_baseline::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .unit("!com.example.internal.*")
//!     .unit("com.example.*")
//!     .fail_on_mismatch(true)
//!     .build();
//!
//! // Load from file
//! use api_baseline::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None)?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.api-baseline.yaml` file in your project root or
//! `~/.config/api-baseline/`:
//!
//! ```yaml
//! baseline:
//!   ignore: ["com.example.api.Legacy#*"]
//! behavior:
//!   fail_on_mismatch: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CONSUMER_ANNOTATION, DEFAULT_IGNORE_ANNOTATION, DEFAULT_PARALLEL_THRESHOLD,
    DEFAULT_PROVIDER_ANNOTATION, DEFAULT_RESERVED_PREFIX, DEFAULT_ROOT_TYPE,
};
pub use types::{
    AppConfig, AppConfigBuilder, BaselineConfig, BehaviorConfig, OutputConfig, PolicyConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option of `.api-baseline.yaml` and can be used
/// by editors for validation and completion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
