//! Declared versions of components and exported units.
//!
//! Versions have the shape `major.minor.micro[.qualifier]`. Missing numeric
//! segments default to zero, so `1` and `1.0` both mean `1.0.0`. Semver syntax
//! (`1.2.3-rc.1+build.5`) is accepted as well, in which case the pre-release and
//! build metadata become the qualifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a version string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid numeric segment '{segment}' in version '{input}'")]
    InvalidNumber { input: String, segment: String },

    #[error("invalid qualifier '{qualifier}' in version '{input}'")]
    InvalidQualifier { input: String, qualifier: String },

    #[error("invalid semver '{input}': {message}")]
    Semver { input: String, message: String },
}

/// A declared version.
///
/// Ordering compares the numeric parts first; an unqualified version sorts
/// before any qualified version with the same numbers, and qualifiers compare
/// lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    micro: u64,
    qualifier: Option<String>,
}

impl Version {
    /// The lowest possible version, `0.0.0`.
    pub const LOWEST: Version = Version::new(0, 0, 0);

    /// `1.0.0`, the first non-empty release.
    pub const ONE: Version = Version::new(1, 0, 0);

    /// Create an unqualified version.
    #[must_use]
    pub const fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: None,
        }
    }

    /// Attach a qualifier. An empty qualifier is dropped.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        let qualifier = qualifier.into();
        self.qualifier = if qualifier.is_empty() {
            None
        } else {
            Some(qualifier)
        };
        self
    }

    /// Parse a possibly absent version, falling back to [`Version::LOWEST`].
    ///
    /// Unparseable input degrades to the lowest version rather than failing the
    /// comparison.
    #[must_use]
    pub fn parse_lenient(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => Self::LOWEST,
            Some(text) => text.parse().unwrap_or_else(|err| {
                tracing::debug!("treating unparseable version as {}: {err}", Self::LOWEST);
                Self::LOWEST
            }),
        }
    }

    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    #[must_use]
    pub const fn micro(&self) -> u64 {
        self.micro
    }

    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Returns true when the version carries a qualifier.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }

    /// Returns true for `0.0.0` without qualifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::LOWEST
    }

    /// Same numbers, no qualifier.
    #[must_use]
    pub const fn without_qualifier(&self) -> Self {
        Self::new(self.major, self.minor, self.micro)
    }

    /// `major+1.0.0`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn next_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    /// `major.minor+1.0`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor.saturating_add(1), 0)
    }

    /// `major.minor.micro+1`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn next_micro(&self) -> Self {
        Self::new(self.major, self.minor, self.micro.saturating_add(1))
    }

    fn parse_dotted(input: &str) -> Result<Self, VersionParseError> {
        let mut segments = input.splitn(4, '.');
        let mut numbers = [0u64; 3];
        for (index, slot) in numbers.iter_mut().enumerate() {
            match segments.next() {
                Some(segment) => {
                    *slot = segment
                        .parse()
                        .map_err(|_| VersionParseError::InvalidNumber {
                            input: input.to_string(),
                            segment: segment.to_string(),
                        })?;
                }
                None if index == 0 => return Err(VersionParseError::Empty),
                None => break,
            }
        }

        let version = Self::new(numbers[0], numbers[1], numbers[2]);
        match segments.next() {
            None => Ok(version),
            Some(qualifier) => {
                let valid = !qualifier.is_empty()
                    && qualifier
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if valid {
                    Ok(version.with_qualifier(qualifier))
                } else {
                    Err(VersionParseError::InvalidQualifier {
                        input: input.to_string(),
                        qualifier: qualifier.to_string(),
                    })
                }
            }
        }
    }

    fn parse_semver(input: &str) -> Result<Self, VersionParseError> {
        let parsed = semver::Version::parse(input).map_err(|e| VersionParseError::Semver {
            input: input.to_string(),
            message: e.to_string(),
        })?;

        let mut qualifier = parsed.pre.as_str().to_string();
        if !parsed.build.is_empty() {
            qualifier.push('+');
            qualifier.push_str(parsed.build.as_str());
        }
        Ok(Self::new(parsed.major, parsed.minor, parsed.patch).with_qualifier(qualifier))
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        match Self::parse_dotted(input) {
            Ok(version) => Ok(version),
            Err(err) if input.contains(['-', '+']) => Self::parse_semver(input).map_err(|_| err),
            Err(err) => Err(err),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{qualifier}")?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
