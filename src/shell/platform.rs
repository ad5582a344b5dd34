//! Host platform detection.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, SetupError};

/// Operating system families we know how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Linux,
    MacOs,
    Windows,
}

impl HostPlatform {
    /// Detect the platform this binary was built for.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(HostPlatform::Linux),
            "macos" => Ok(HostPlatform::MacOs),
            "windows" => Ok(HostPlatform::Windows),
            other => Err(SetupError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Shared library file extension.
    pub fn library_extension(&self) -> &'static str {
        match self {
            HostPlatform::Linux => "so",
            HostPlatform::MacOs => "dylib",
            HostPlatform::Windows => "dll",
        }
    }

    /// Homebrew prefix for this machine (macOS only).
    pub fn homebrew_prefix(&self) -> Option<PathBuf> {
        match self {
            HostPlatform::MacOs => {
                if cfg!(target_arch = "aarch64") {
                    Some(PathBuf::from("/opt/homebrew"))
                } else {
                    Some(PathBuf::from("/usr/local"))
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostPlatform::Linux => "Linux",
            HostPlatform::MacOs => "macOS",
            HostPlatform::Windows => "Windows",
        };
        f.write_str(name)
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_maps_known_systems() {
        assert_eq!(HostPlatform::from_os("linux").unwrap(), HostPlatform::Linux);
        assert_eq!(HostPlatform::from_os("macos").unwrap(), HostPlatform::MacOs);
        assert_eq!(
            HostPlatform::from_os("windows").unwrap(),
            HostPlatform::Windows
        );
    }

    #[test]
    fn from_os_rejects_unknown_systems() {
        let err = HostPlatform::from_os("freebsd").unwrap_err();
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn library_extensions() {
        assert_eq!(HostPlatform::Linux.library_extension(), "so");
        assert_eq!(HostPlatform::MacOs.library_extension(), "dylib");
        assert_eq!(HostPlatform::Windows.library_extension(), "dll");
    }

    #[test]
    fn homebrew_prefix_only_on_macos() {
        assert!(HostPlatform::MacOs.homebrew_prefix().is_some());
        assert!(HostPlatform::Linux.homebrew_prefix().is_none());
    }

    #[test]
    fn display_names() {
        assert_eq!(HostPlatform::MacOs.to_string(), "macOS");
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }
}
