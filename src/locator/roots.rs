//! Where to look for Tcl/Tk support files on each platform.

use std::path::PathBuf;

use serde::Serialize;

use crate::shell::HostPlatform;
use crate::version::SupportedVersion;

/// Ordered search roots plus one broader fallback root.
///
/// Roots are searched in order. The fallback is searched only for patterns
/// that no root matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPlan {
    pub roots: Vec<PathBuf>,
    pub fallback: Option<PathBuf>,
}

impl SearchPlan {
    pub fn new(roots: Vec<PathBuf>, fallback: Option<PathBuf>) -> Self {
        Self { roots, fallback }
    }

    /// Platform defaults for the given target version.
    pub fn for_platform(platform: HostPlatform, version: &SupportedVersion) -> Self {
        match platform {
            HostPlatform::Linux => Self::new(
                vec![
                    PathBuf::from("/usr/lib"),
                    PathBuf::from("/usr/local/lib"),
                    PathBuf::from("/usr/include"),
                    PathBuf::from("/usr/local/include"),
                ],
                Some(PathBuf::from("/usr")),
            ),
            HostPlatform::MacOs => {
                let brew = platform
                    .homebrew_prefix()
                    .unwrap_or_else(|| PathBuf::from("/usr/local"));
                let formula = format!("tcl-tk@{}", version.major());
                Self::new(
                    vec![
                        brew.join("opt").join(&formula),
                        brew.join("Cellar").join(&formula),
                        PathBuf::from("/Library/Frameworks/Tcl.framework"),
                        PathBuf::from("/Library/Frameworks/Tk.framework"),
                    ],
                    Some(brew),
                )
            }
            HostPlatform::Windows => Self::new(
                vec![PathBuf::from(r"C:\ActiveTcl"), PathBuf::from(r"C:\Tcl")],
                Some(PathBuf::from(r"C:\")),
            ),
        }
    }

    /// Replace the roots and/or fallback, keeping whatever is not given.
    pub fn with_overrides(mut self, roots: Option<Vec<PathBuf>>, fallback: Option<PathBuf>) -> Self {
        if let Some(roots) = roots.filter(|r| !r.is_empty()) {
            self.roots = roots;
        }
        if fallback.is_some() {
            self.fallback = fallback;
        }
        self
    }
}
