//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".api-baseline.yaml",
    ".api-baseline.yml",
    "api-baseline.yaml",
    "api-baseline.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/api-baseline/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("api-baseline")))
    {
        return Some(path);
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl From<ConfigFileError> for crate::error::BaselineError {
    fn from(err: ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// An explicitly requested file that fails to load is an error; a discovered
/// one only produces a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Lists are appended, and scalar values only override when they differ
    /// from the default.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Baseline config
        self.baseline.units.extend(other.baseline.units.iter().cloned());
        self.baseline.ignore.extend(other.baseline.ignore.iter().cloned());
        if other.baseline.reserved_prefixes != defaults.baseline.reserved_prefixes {
            self.baseline
                .reserved_prefixes
                .clone_from(&other.baseline.reserved_prefixes);
        }
        if other.baseline.parallel_threshold != defaults.baseline.parallel_threshold {
            self.baseline.parallel_threshold = other.baseline.parallel_threshold;
        }

        // Policy config
        if other.policy != defaults.policy {
            self.policy = other.policy.clone();
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.show_all {
            self.output.show_all = true;
        }
        if other.output.show_diff {
            self.output.show_diff = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_mismatch {
            self.behavior.fail_on_mismatch = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# api-baseline configuration
# Place this file at .api-baseline.yaml in your project root or
# ~/.config/api-baseline/api-baseline.yaml. CLI arguments override it.

baseline:
  # Ordered unit instructions; the first match wins and '!' excludes
  units: []
  #   - "!com.example.internal.*"
  #   - "com.example.*"
  # Paths to ignore: packages, types, or Type#member
  ignore: []
  reserved_prefixes:
    - "java."
  parallel_threshold: 64

policy:
  provider_annotation: org.osgi.annotation.versioning.ProviderType
  consumer_annotation: org.osgi.annotation.versioning.ConsumerType
  ignore_annotation: aQute.bnd.annotation.baseline.BaselineIgnore
  root_type: java.lang.Object

output:
  # Format: summary, json
  format: summary
  # file: baseline.json
  show_all: false
  show_diff: false

behavior:
  # Exit with code 1 on a version mismatch
  fail_on_mismatch: false
  quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join(".api-baseline.yaml");
        std::fs::write(&config_path, "behavior:\n  fail_on_mismatch: true\n").expect("write");

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
baseline:
  units: ["!p.internal", "p.*"]
  parallel_threshold: 8
policy:
  root_type: java.lang.Object
output:
  format: json
behavior:
  fail_on_mismatch: true
"#;
        std::fs::write(&config_path, yaml).expect("write");

        let config = load_config_file(&config_path).expect("config");
        assert_eq!(config.baseline.units, vec!["!p.internal", "p.*"]);
        assert_eq!(config.baseline.parallel_threshold, 8);
        assert_eq!(
            config.baseline.reserved_prefixes,
            vec!["java.".to_string()],
            "missing keys keep their defaults"
        );
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_mismatch);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_bad_file_is_an_error() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "baseline: [not, a, map]\n").expect("write");

        assert!(matches!(
            load_or_default(Some(&config_path)),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().unit("p.*").build();
        let overrides = AppConfig::builder()
            .unit("q.*")
            .ignore("p.C#m()")
            .fail_on_mismatch(true)
            .output_format(ReportFormat::Json)
            .build();

        base.merge(&overrides);

        assert_eq!(base.baseline.units, vec!["p.*", "q.*"]);
        assert_eq!(base.baseline.ignore, vec!["p.C#m()"]);
        assert_eq!(base.output.format, ReportFormat::Json);
        assert!(base.behavior.fail_on_mismatch);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("example parses");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").expect("write");

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
