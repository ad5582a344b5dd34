//! System package manager detection.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::shell::HostPlatform;

use super::path::{parse_system_path, resolve_tool_path};

/// A package manager able to install Tcl/Tk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
    Homebrew,
    /// Chocolatey, installing the ActiveTcl distribution.
    Chocolatey,
}

impl PackageManager {
    /// Executable name looked up on PATH.
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Homebrew => "brew",
            PackageManager::Chocolatey => "choco",
        }
    }

    /// Whether install/remove commands need root.
    pub fn needs_root(&self) -> bool {
        matches!(
            self,
            PackageManager::Apt | PackageManager::Dnf | PackageManager::Pacman
        )
    }

    /// Managers to try on a platform, in preference order.
    pub fn candidates(platform: HostPlatform) -> &'static [PackageManager] {
        match platform {
            HostPlatform::Linux => &[
                PackageManager::Apt,
                PackageManager::Dnf,
                PackageManager::Pacman,
            ],
            HostPlatform::MacOs => &[PackageManager::Homebrew],
            HostPlatform::Windows => &[PackageManager::Chocolatey],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// Detects the first reachable package manager for a platform.
pub struct PackageManagerDetector {
    path: Vec<PathBuf>,
}

impl PackageManagerDetector {
    /// Detect against the system PATH.
    pub fn new() -> Self {
        Self {
            path: parse_system_path(),
        }
    }

    /// Detect against an explicit list of directories.
    pub fn with_path(path: Vec<PathBuf>) -> Self {
        Self { path }
    }

    /// First candidate whose executable is reachable.
    pub fn detect(&self, platform: HostPlatform) -> Option<PackageManager> {
        let found = PackageManager::candidates(platform)
            .iter()
            .copied()
            .find(|pm| resolve_tool_path(pm.executable(), &self.path).is_some());
        tracing::debug!("Package manager for {}: {:?}", platform, found);
        found
    }
}

impl Default for PackageManagerDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_tool(dir: &std::path::Path, name: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn detects_apt_before_dnf() {
        let temp = TempDir::new().unwrap();
        fake_tool(temp.path(), "dnf");
        fake_tool(temp.path(), "apt-get");

        let detector = PackageManagerDetector::with_path(vec![temp.path().to_path_buf()]);
        assert_eq!(
            detector.detect(HostPlatform::Linux),
            Some(PackageManager::Apt)
        );
    }

    #[cfg(unix)]
    #[test]
    fn falls_through_to_later_candidates() {
        let temp = TempDir::new().unwrap();
        fake_tool(temp.path(), "pacman");

        let detector = PackageManagerDetector::with_path(vec![temp.path().to_path_buf()]);
        assert_eq!(
            detector.detect(HostPlatform::Linux),
            Some(PackageManager::Pacman)
        );
    }

    #[cfg(unix)]
    #[test]
    fn homebrew_only_considered_on_macos() {
        let temp = TempDir::new().unwrap();
        fake_tool(temp.path(), "brew");

        let detector = PackageManagerDetector::with_path(vec![temp.path().to_path_buf()]);
        assert_eq!(detector.detect(HostPlatform::Linux), None);
        assert_eq!(
            detector.detect(HostPlatform::MacOs),
            Some(PackageManager::Homebrew)
        );
    }

    #[test]
    fn nothing_found_in_empty_path() {
        let temp = TempDir::new().unwrap();
        let detector = PackageManagerDetector::with_path(vec![temp.path().to_path_buf()]);
        assert_eq!(detector.detect(HostPlatform::Windows), None);
    }

    #[test]
    fn only_linux_managers_need_root() {
        assert!(PackageManager::Apt.needs_root());
        assert!(!PackageManager::Homebrew.needs_root());
        assert!(!PackageManager::Chocolatey.needs_root());
    }
}
