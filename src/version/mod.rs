//! Tcl/Tk version strings and the compatibility decision.
//!
//! - [`string`] - Parsed patch-level versions and the supported target
//! - [`classifier`] - Maps a probed version to a [`CompatibilityVerdict`]

pub mod classifier;
pub mod string;

pub use classifier::{classify, CompatibilityVerdict};
pub use string::{SupportedVersion, VersionString, DEFAULT_SUPPORTED_VERSION};
