//! tcltk-setup - Detect, install and wire up a compatible Tcl/Tk runtime.
//!
//! The run probes for a Tcl interpreter, classifies what it finds against the
//! supported major-minor version, installs the runtime through the host
//! package manager when needed, waits for the interpreter to appear, and then
//! locates the support files a GUI binding needs to build.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered YAML configuration
//! - [`detection`] - Interpreter probing and package manager detection
//! - [`error`] - Error types and result aliases
//! - [`install`] - Package install, compatibility links, binding and smoke test
//! - [`locator`] - Filesystem search for headers, libraries and config scripts
//! - [`logging`] - Console and file tracing layers
//! - [`runner`] - Retry and the end-to-end workflow
//! - [`shell`] - Process execution and host platform facts
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`version`] - Version strings and compatibility verdicts
//!
//! # Example
//!
//! ```
//! use tcltk_setup::version::{classify, CompatibilityVerdict, SupportedVersion, VersionString};
//!
//! let supported = SupportedVersion::default();
//! let found = VersionString::parse("9.0.1");
//! assert_eq!(
//!     classify(found.as_ref(), &supported),
//!     CompatibilityVerdict::UnsupportedMajorNine
//! );
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod install;
pub mod locator;
pub mod logging;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{Result, SetupError};
