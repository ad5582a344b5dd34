//! Error types for tcltk-setup operations.
//!
//! This module defines [`SetupError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - "Nothing installed yet" is not an error: the prober returns `None`
//! - Every variant here is terminal for a run; `main` maps it to a non-zero exit
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - Messages carry enough context for an operator to finish the job by hand

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tcltk-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// One or more required Tcl/Tk support files could not be found.
    #[error("Could not locate Tcl/Tk {version} support files: {}", missing.join(", "))]
    LocateFailure {
        version: String,
        missing: Vec<String>,
    },

    /// The interpreter never became visible after an install.
    #[error("No Tcl interpreter detected after {attempts} attempt(s)")]
    RetryExhausted { attempts: u32 },

    /// The package manager reported failure.
    #[error("Installing Tcl/Tk via {manager} failed: {message}")]
    InstallFailure { manager: String, message: String },

    /// A version is present but still not the supported one.
    #[error("Tcl/Tk {detected} is installed but {supported} is required")]
    UnsupportedVersion { detected: String, supported: String },

    /// No usable package manager was found on this host.
    #[error("No supported package manager found for {platform}")]
    NoPackageManager { platform: String },

    /// The host operating system is not one we know how to provision.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// The GUI binding package failed to install.
    #[error("Installing binding package '{package}' failed: {message}")]
    BindingInstallFailed { package: String, message: String },

    /// The smoke-test window failed to open or exit cleanly.
    #[error("Smoke test failed: {message}")]
    SmokeTestFailed { message: String },

    /// External command could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Process exit code for this error.
    ///
    /// Configuration problems exit with 2 so scripts can tell them apart
    /// from a failed provisioning run.
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::ConfigNotFound { .. }
            | SetupError::ConfigParseError { .. }
            | SetupError::ConfigValidationError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for tcltk-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = SetupError::ConfigNotFound {
            path: PathBuf::from("/foo/bar.yml"),
        };
        assert!(err.to_string().contains("/foo/bar.yml"));
    }

    #[test]
    fn locate_failure_lists_every_missing_file() {
        let err = SetupError::LocateFailure {
            version: "8.6".into(),
            missing: vec!["tkConfig.sh".into(), "tk.h".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("8.6"));
        assert!(msg.contains("tkConfig.sh, tk.h"));
    }

    #[test]
    fn retry_exhausted_displays_attempts() {
        let err = SetupError::RetryExhausted { attempts: 3 };
        assert!(err.to_string().contains("3 attempt"));
    }

    #[test]
    fn install_failure_displays_manager_and_message() {
        let err = SetupError::InstallFailure {
            manager: "apt-get".into(),
            message: "exit code 100".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get"));
        assert!(msg.contains("exit code 100"));
    }

    #[test]
    fn unsupported_version_displays_both_versions() {
        let err = SetupError::UnsupportedVersion {
            detected: "9.0.1".into(),
            supported: "8.6".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("9.0.1"));
        assert!(msg.contains("8.6"));
    }

    #[test]
    fn config_errors_exit_with_two() {
        let err = SetupError::ConfigValidationError {
            message: "bad".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn run_errors_exit_with_one() {
        assert_eq!(SetupError::RetryExhausted { attempts: 1 }.exit_code(), 1);
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
