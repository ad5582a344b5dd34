//! The support files a usable Tcl/Tk installation must provide.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shell::HostPlatform;
use crate::version::SupportedVersion;

/// Which half of the runtime pair a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tcl,
    Tk,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Tcl => f.write_str("tcl"),
            Role::Tk => f.write_str("tk"),
        }
    }
}

/// A file-name glob that must match at least one file on disk.
///
/// Patterns match the file name only and ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFile {
    pub pattern: String,
    pub role: Role,
}

impl RequiredFile {
    pub fn tcl(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            role: Role::Tcl,
        }
    }

    pub fn tk(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            role: Role::Tk,
        }
    }

    /// Whether this is a C header.
    pub fn is_header(&self) -> bool {
        self.pattern.to_ascii_lowercase().ends_with(".h")
    }

    /// Whether this is a shared library.
    pub fn is_library(&self, platform: HostPlatform) -> bool {
        self.pattern
            .to_ascii_lowercase()
            .contains(&format!(".{}", platform.library_extension()))
    }
}

/// Config scripts first, so each role's runtime directory comes from its
/// `*Config.sh`; libraries and headers follow.
pub fn default_required_files(
    platform: HostPlatform,
    version: &SupportedVersion,
) -> Vec<RequiredFile> {
    let v = version.as_str();
    let (tcl_lib, tk_lib) = match platform {
        HostPlatform::Linux => (format!("libtcl{v}.so*"), format!("libtk{v}.so*")),
        HostPlatform::MacOs => (format!("libtcl{v}*.dylib"), format!("libtk{v}*.dylib")),
        HostPlatform::Windows => {
            let vv = version.compact();
            (format!("tcl{vv}*.dll"), format!("tk{vv}*.dll"))
        }
    };

    vec![
        RequiredFile::tcl("tclConfig.sh"),
        RequiredFile::tk("tkConfig.sh"),
        RequiredFile::tcl(tcl_lib),
        RequiredFile::tk(tk_lib),
        RequiredFile::tcl("tcl.h"),
        RequiredFile::tk("tk.h"),
    ]
}
