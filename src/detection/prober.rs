//! Tcl interpreter version probe.
//!
//! Finds a `tclsh` on the search path and asks it for its patch level by
//! feeding `puts [info patchlevel]` on stdin. Anything short of a clean
//! version string on stdout counts as "not detected".

use std::path::PathBuf;

use crate::shell::{execute_quiet, HostPlatform, Invocation};
use crate::version::{SupportedVersion, VersionString};

use super::path::{augmented_path, resolve_tool_path};

/// Script fed to the interpreter.
pub const PATCHLEVEL_SCRIPT: &str = "puts [info patchlevel]\n";

/// Something that can report the installed Tcl version.
///
/// `None` is the legitimate "nothing installed yet" state.
pub trait VersionProbe {
    fn probe(&self) -> Option<VersionString>;
}

impl<F> VersionProbe for F
where
    F: Fn() -> Option<VersionString>,
{
    fn probe(&self) -> Option<VersionString> {
        self()
    }
}

/// Probes a real `tclsh` through the process boundary.
#[derive(Debug, Clone)]
pub struct TclshProber {
    executables: Vec<String>,
    extra_dirs: Vec<PathBuf>,
}

impl TclshProber {
    /// Create a prober for the given executable names.
    ///
    /// `extra_dirs` are searched before the system PATH.
    pub fn new(executables: Vec<String>, extra_dirs: Vec<PathBuf>) -> Self {
        Self {
            executables,
            extra_dirs,
        }
    }

    /// The directories searched, in order.
    pub fn search_path(&self) -> Vec<PathBuf> {
        augmented_path(&self.extra_dirs)
    }

    /// Locate the first reachable interpreter.
    ///
    /// Executable names are tried in order, each across the whole path.
    pub fn find_interpreter(&self) -> Option<PathBuf> {
        let path = self.search_path();
        self.executables
            .iter()
            .find_map(|name| resolve_tool_path(name, &path))
    }
}

impl VersionProbe for TclshProber {
    fn probe(&self) -> Option<VersionString> {
        let Some(interpreter) = self.find_interpreter() else {
            tracing::info!(
                executables = ?self.executables,
                "No Tcl interpreter on the search path"
            );
            return None;
        };

        let invocation = Invocation::new(&interpreter).with_stdin(PATCHLEVEL_SCRIPT);
        let result = match execute_quiet(&invocation, None) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Could not run {}: {}", interpreter.display(), e);
                return None;
            }
        };

        if !result.success {
            tracing::warn!(
                "{} exited unsuccessfully ({})",
                interpreter.display(),
                result.failure_summary()
            );
            return None;
        }

        let first_line = result.stdout.lines().next().unwrap_or_default();
        match VersionString::parse(first_line) {
            Some(version) => {
                tracing::info!(
                    interpreter = %interpreter.display(),
                    "Detected Tcl {}",
                    version
                );
                Some(version)
            }
            None => {
                tracing::warn!(
                    "{} printed '{}', which is not a version",
                    interpreter.display(),
                    first_line.trim()
                );
                None
            }
        }
    }
}

/// Executable names tried by default: `tclsh`, then `tclsh<major.minor>`.
pub fn default_executables(supported: &SupportedVersion) -> Vec<String> {
    vec!["tclsh".to_string(), format!("tclsh{}", supported)]
}

/// Install locations whose `bin` directories are searched ahead of PATH.
///
/// Homebrew's `tcl-tk@8` is keg-only, so a fresh install is not on PATH
/// and a newer `tcl-tk` may be linked there instead.
pub fn default_interpreter_dirs(
    platform: HostPlatform,
    supported: &SupportedVersion,
) -> Vec<PathBuf> {
    match platform {
        HostPlatform::Linux => Vec::new(),
        HostPlatform::MacOs => platform
            .homebrew_prefix()
            .map(|brew| {
                vec![brew
                    .join("opt")
                    .join(format!("tcl-tk@{}", supported.major()))
                    .join("bin")]
            })
            .unwrap_or_default(),
        HostPlatform::Windows => vec![
            PathBuf::from(r"C:\ActiveTcl\bin"),
            PathBuf::from(r"C:\Tcl\bin"),
        ],
    }
}
