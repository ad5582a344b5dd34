//! Library discovery for an installed Tcl/Tk.
//!
//! Given a target version, a [`SearchPlan`] and a list of [`RequiredFile`]s,
//! [`locate`] finds each file on disk and derives the runtime directories
//! for Tcl and Tk.
//!
//! # Example
//!
//! ```no_run
//! use tcltk_setup::locator::{locate, RequiredFile, SearchPlan};
//! use tcltk_setup::version::VersionString;
//!
//! let target = VersionString::parse("8.6").unwrap();
//! let plan = SearchPlan::new(vec!["/usr/lib".into()], Some("/usr".into()));
//! match locate(&target, &plan, &[RequiredFile::tcl("tclConfig.sh")]) {
//!     Ok(location) => println!("tcl: {:?}", location.tcl_runtime),
//!     Err(failure) => println!("missing: {}", failure.missing.join(", ")),
//! }
//! ```

pub mod required;
pub mod roots;
pub mod search;

pub use required::{default_required_files, RequiredFile, Role};
pub use roots::SearchPlan;
pub use search::{locate, LocateFailure, ResolvedFile, ResolvedLocation};
