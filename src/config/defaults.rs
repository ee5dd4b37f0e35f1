//! Default values for api-baseline configuration.

/// Units under this prefix belong to the platform and are never baselined.
pub const DEFAULT_RESERVED_PREFIX: &str = "java.";

/// Above this many units, units are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Provider role marker.
pub const DEFAULT_PROVIDER_ANNOTATION: &str = "org.osgi.annotation.versioning.ProviderType";

/// Consumer role marker.
pub const DEFAULT_CONSUMER_ANNOTATION: &str = "org.osgi.annotation.versioning.ConsumerType";

/// Ignore-below-version marker.
pub const DEFAULT_IGNORE_ANNOTATION: &str = "aQute.bnd.annotation.baseline.BaselineIgnore";

/// Implicit supertype of every class.
pub const DEFAULT_ROOT_TYPE: &str = "java.lang.Object";
