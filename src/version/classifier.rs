//! Compatibility classification.
//!
//! Each probe produces a [`CompatibilityVerdict`] that describes whether the
//! installed runtime can be used as-is.

use serde::Serialize;

use super::string::{SupportedVersion, VersionString};

/// Outcome of comparing a probed version with the supported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityVerdict {
    /// Major-minor matches the supported version.
    Compatible,

    /// The 9.x line, which the binding package cannot build against.
    UnsupportedMajorNine,

    /// Some other version (older, or a different minor).
    UnsupportedOther,

    /// No interpreter was detected.
    NotFound,
}

impl CompatibilityVerdict {
    /// Whether a package install is needed before continuing.
    pub fn needs_install(&self) -> bool {
        !matches!(self, CompatibilityVerdict::Compatible)
    }

    /// Operator-facing reason for the verdict.
    pub fn describe(&self, detected: Option<&VersionString>, supported: &SupportedVersion) -> String {
        match (self, detected) {
            (CompatibilityVerdict::Compatible, Some(v)) => {
                format!("Tcl/Tk {} is compatible", v)
            }
            (CompatibilityVerdict::UnsupportedMajorNine, Some(v)) => format!(
                "Tcl/Tk {} is from the 9.x line, which the binding does not support; {} is required",
                v, supported
            ),
            (CompatibilityVerdict::UnsupportedOther, Some(v)) => {
                format!("Tcl/Tk {} found but {} is required", v, supported)
            }
            _ => format!("No Tcl interpreter found; {} is required", supported),
        }
    }
}

/// Classify a probed version against the supported major-minor.
///
/// `None` means the prober found nothing; it is never treated as compatible.
pub fn classify(
    detected: Option<&VersionString>,
    supported: &SupportedVersion,
) -> CompatibilityVerdict {
    let Some(version) = detected else {
        return CompatibilityVerdict::NotFound;
    };

    if version.major_minor() == supported.as_str() {
        CompatibilityVerdict::Compatible
    } else if version.major() == "9" {
        CompatibilityVerdict::UnsupportedMajorNine
    } else {
        CompatibilityVerdict::UnsupportedOther
    }
}
