//! Configuration schema.
//!
//! Every section is optional in YAML; missing keys take the defaults below.
//!
//! ```yaml
//! supported_version: "8.6"
//! log_file: tcltk-setup.log
//! retry:
//!   max_attempts: 3
//!   base_delay_secs: 5
//! probe:
//!   executables: [tclsh, tclsh8.6]
//! search:
//!   roots: [/usr/lib, /usr/local/lib]
//!   fallback_root: /usr
//! symlinks:
//!   enabled: true
//!   link_dir: /usr/local/lib
//! binding:
//!   enabled: true
//!   program: gem
//!   package: tk
//! smoke_test:
//!   enabled: true
//!   program: ruby
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detection::prober::{default_executables, default_interpreter_dirs};
use crate::locator::{default_required_files, RequiredFile, SearchPlan};
use crate::runner::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::shell::HostPlatform;
use crate::version::SupportedVersion;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "tcltk-setup.log";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// The `major.minor` Tcl/Tk release to install and wire up.
    pub supported_version: SupportedVersion,

    /// Append-only log file.
    pub log_file: Option<PathBuf>,

    pub retry: RetrySettings,
    pub probe: ProbeSettings,
    pub search: SearchSettings,
    pub symlinks: SymlinkSettings,
    pub binding: BindingSettings,
    pub smoke_test: SmokeTestSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_secs: DEFAULT_BASE_DELAY.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Interpreter names tried in order. Defaults to `tclsh`, `tclsh<v>`.
    pub executables: Option<Vec<String>>,

    /// Directories searched ahead of PATH.
    pub extra_dirs: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub roots: Option<Vec<PathBuf>>,
    pub fallback_root: Option<PathBuf>,
    pub required_files: Option<Vec<RequiredFile>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymlinkSettings {
    pub enabled: bool,
    pub link_dir: Option<PathBuf>,
}

impl Default for SymlinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            link_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingSettings {
    pub enabled: bool,
    pub program: String,
    pub package: String,
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "gem".to_string(),
            package: "tk".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeTestSettings {
    pub enabled: bool,
    pub program: String,
}

impl Default for SmokeTestSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "ruby".to_string(),
        }
    }
}

impl SetupConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_secs(self.retry.base_delay_secs),
        )
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn executables(&self) -> Vec<String> {
        self.probe
            .executables
            .clone()
            .unwrap_or_else(|| default_executables(&self.supported_version))
    }

    pub fn interpreter_dirs(&self, platform: HostPlatform) -> Vec<PathBuf> {
        self.probe
            .extra_dirs
            .clone()
            .unwrap_or_else(|| default_interpreter_dirs(platform, &self.supported_version))
    }

    /// Platform search plan with configured overrides applied.
    pub fn search_plan(&self, platform: HostPlatform) -> SearchPlan {
        SearchPlan::for_platform(platform, &self.supported_version).with_overrides(
            self.search.roots.clone(),
            self.search.fallback_root.clone(),
        )
    }

    pub fn required_files(&self, platform: HostPlatform) -> Vec<RequiredFile> {
        self.search
            .required_files
            .clone()
            .unwrap_or_else(|| default_required_files(platform, &self.supported_version))
    }

    /// Where unversioned library links go. `None` on Windows.
    pub fn link_dir(&self, platform: HostPlatform) -> Option<PathBuf> {
        if platform == HostPlatform::Windows {
            return None;
        }
        if let Some(dir) = &self.symlinks.link_dir {
            return Some(dir.clone());
        }
        match platform {
            HostPlatform::Linux => Some(PathBuf::from("/usr/local/lib")),
            HostPlatform::MacOs => platform.homebrew_prefix().map(|brew| brew.join("lib")),
            HostPlatform::Windows => None,
        }
    }
}
