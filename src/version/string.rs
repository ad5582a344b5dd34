//! Version string parsing.
//!
//! A Tcl interpreter reports its patch level as a dotted identifier such as
//! `8.6.14` or `9.0b2`. Compatibility is decided on the first two components
//! only (the "major-minor"), so that is what [`VersionString::major_minor`]
//! exposes.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SetupError;

/// Major-minor version the rest of the run targets unless configured otherwise.
pub const DEFAULT_SUPPORTED_VERSION: &str = "8.6";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.[0-9A-Za-z]+)*$").expect("version pattern is valid"));

static MAJOR_MINOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("major-minor pattern is valid"));

/// A patch-level version reported by a Tcl interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionString(String);

impl VersionString {
    /// Parse a version, trimming surrounding whitespace.
    ///
    /// Returns `None` for anything that is not a dotted version.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if VERSION_PATTERN.is_match(trimmed) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// The full version as reported.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First dot-separated component.
    pub fn major(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// First two dot-separated components joined by `.`.
    ///
    /// A single-component version is its own major-minor.
    pub fn major_minor(&self) -> String {
        self.0.split('.').take(2).collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VersionString {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SetupError::ConfigValidationError {
            message: format!("'{}' is not a version string", s),
        })
    }
}

impl Serialize for VersionString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The single major-minor version this run installs and wires up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SupportedVersion(String);

impl SupportedVersion {
    /// Parse a `major.minor` value such as `8.6`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if MAJOR_MINOR_PATTERN.is_match(trimmed) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// The `major.minor` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Major component (e.g. `8`).
    pub fn major(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Major-minor without the dot (e.g. `86`), as used in Windows DLL names.
    pub fn compact(&self) -> String {
        self.0.replace('.', "")
    }

    /// The supported version as a [`VersionString`], for use as a locator target.
    pub fn as_version(&self) -> VersionString {
        VersionString(self.0.clone())
    }
}

impl Default for SupportedVersion {
    fn default() -> Self {
        Self(DEFAULT_SUPPORTED_VERSION.to_string())
    }
}

impl fmt::Display for SupportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SupportedVersion {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SetupError::ConfigValidationError {
            message: format!("supported version '{}' must look like '8.6'", s),
        })
    }
}

impl Serialize for SupportedVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// YAML reads an unquoted `8.6` as a float, which cannot keep `9.0` or
/// `8.10` intact, so numbers are rejected with a hint to quote them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSupportedVersion {
    Text(String),
    Number(f64),
}

impl<'de> Deserialize<'de> for SupportedVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawSupportedVersion::deserialize(deserializer)? {
            RawSupportedVersion::Text(s) => s,
            RawSupportedVersion::Number(n) => {
                return Err(serde::de::Error::custom(format!(
                    "supported_version was read as the number {}; quote it, e.g. \"9.0\"",
                    n
                )));
            }
        };
        SupportedVersion::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "supported_version '{}' must look like '8.6'",
                raw
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let v = VersionString::parse("  8.6.14\n").unwrap();
        assert_eq!(v.as_str(), "8.6.14");
    }

    #[test]
    fn parse_accepts_beta_patch_levels() {
        let v = VersionString::parse("9.0b2").unwrap();
        assert_eq!(v.major(), "9");
        assert_eq!(v.major_minor(), "9.0b2");
    }

    #[test]
    fn parse_rejects_non_versions() {
        assert!(VersionString::parse("").is_none());
        assert!(VersionString::parse("can't find package").is_none());
        assert!(VersionString::parse("v8.6").is_none());
        assert!(VersionString::parse("8..6").is_none());
    }

    #[test]
    fn major_minor_takes_first_two_components() {
        assert_eq!(VersionString::parse("8.6.14").unwrap().major_minor(), "8.6");
        assert_eq!(VersionString::parse("8.6").unwrap().major_minor(), "8.6");
        assert_eq!(VersionString::parse("9").unwrap().major_minor(), "9");
    }

    #[test]
    fn supported_version_requires_major_minor() {
        assert!(SupportedVersion::parse("8.6").is_some());
        assert!(SupportedVersion::parse("8").is_none());
        assert!(SupportedVersion::parse("8.6.1").is_none());
    }

    #[test]
    fn supported_version_compact_drops_dot() {
        let v = SupportedVersion::parse("8.6").unwrap();
        assert_eq!(v.compact(), "86");
        assert_eq!(v.major(), "8");
    }

    #[test]
    fn supported_version_defaults_to_eight_six() {
        assert_eq!(SupportedVersion::default().as_str(), "8.6");
    }

    #[test]
    fn supported_version_deserializes_from_yaml() {
        let v: SupportedVersion = serde_yaml::from_str("\"8.5\"").unwrap();
        assert_eq!(v.as_str(), "8.5");
        assert!(serde_yaml::from_str::<SupportedVersion>("\"eight\"").is_err());
    }

    #[test]
    fn supported_version_deserializes_quoted_text() {
        let v: SupportedVersion = serde_yaml::from_str("\"9.0\"").unwrap();
        assert_eq!(v.as_str(), "9.0");

        let v: SupportedVersion = serde_yaml::from_str("\"8.10\"").unwrap();
        assert_eq!(v.as_str(), "8.10");
    }

    #[test]
    fn unquoted_trailing_zero_is_rejected_not_truncated() {
        let err = serde_yaml::from_str::<SupportedVersion>("9.0").unwrap_err();
        assert!(err.to_string().contains("quote it"), "{err}");
    }

    #[test]
    fn unquoted_two_digit_minor_is_rejected_not_truncated() {
        let result = serde_yaml::from_str::<SupportedVersion>("8.10");
        assert!(result.is_err(), "{result:?}");
    }

    #[test]
    fn from_str_reports_config_error() {
        let err = "x.y".parse::<SupportedVersion>().unwrap_err();
        assert!(matches!(err, SetupError::ConfigValidationError { .. }));
    }
}
