//! Detection of the installed interpreter and the host's package manager.
//!
//! # Modules
//!
//! - [`path`] - PATH parsing and executable lookup
//! - [`prober`] - Tcl interpreter version probe
//! - [`package_manager`] - Package manager detection per platform

pub mod package_manager;
pub mod path;
pub mod prober;

pub use package_manager::{PackageManager, PackageManagerDetector};
pub use prober::{TclshProber, VersionProbe};
