//! Unversioned library links (`libtcl.so -> libtcl8.6.so`).
//!
//! Build tools that link with `-ltcl` look for the unversioned name, which
//! most distributions only ship in their `-dev` packages, if at all.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::locator::ResolvedLocation;
use crate::shell::HostPlatform;
use crate::version::SupportedVersion;

/// What happened to one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LinkOutcome {
    Created { link: PathBuf, target: PathBuf },
    Replaced { link: PathBuf, target: PathBuf },
    Unchanged { link: PathBuf },
    Skipped { link: Option<PathBuf>, reason: String },
    Failed { link: PathBuf, message: String },
}

impl LinkOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LinkOutcome::Failed { .. })
    }

    /// One-line summary for the UI.
    pub fn describe(&self) -> String {
        match self {
            LinkOutcome::Created { link, target } => {
                format!("Linked {} -> {}", link.display(), target.display())
            }
            LinkOutcome::Replaced { link, target } => {
                format!("Relinked {} -> {}", link.display(), target.display())
            }
            LinkOutcome::Unchanged { link } => format!("{} already linked", link.display()),
            LinkOutcome::Skipped {
                link: Some(link),
                reason,
            } => format!("Skipped {}: {}", link.display(), reason),
            LinkOutcome::Skipped { link: None, reason } => format!("Skipped links: {}", reason),
            LinkOutcome::Failed { link, message } => {
                format!("Could not link {}: {}", link.display(), message)
            }
        }
    }
}

/// Unversioned form of a shared-library file name.
///
/// `libtcl8.6.so.0` becomes `libtcl.so`; `libtk8.6.dylib` becomes
/// `libtk.dylib`. Names without the version or the extension give `None`.
pub fn unversioned_name(
    file_name: &str,
    version: &SupportedVersion,
    platform: HostPlatform,
) -> Option<String> {
    let stripped = file_name.replacen(version.as_str(), "", 1);
    if stripped == file_name {
        return None;
    }
    let ext = format!(".{}", platform.library_extension());
    let end = stripped.find(&ext)? + ext.len();
    Some(stripped[..end].to_string())
}

/// Create unversioned links in `link_dir` for every resolved shared library.
///
/// Each link is handled independently; one failure never stops the rest.
pub fn create_links(
    location: &ResolvedLocation,
    version: &SupportedVersion,
    link_dir: &Path,
    platform: HostPlatform,
) -> Vec<LinkOutcome> {
    if platform == HostPlatform::Windows {
        return vec![LinkOutcome::Skipped {
            link: None,
            reason: "symlinks are not used on Windows".to_string(),
        }];
    }

    let ext = format!(".{}", platform.library_extension());
    let libraries = location.files.iter().filter(|f| {
        f.path
            .file_name()
            .map(|n| n.to_string_lossy().contains(&ext))
            .unwrap_or(false)
    });

    let mut outcomes = Vec::new();
    for file in libraries {
        let Some(name) = file
            .path
            .file_name()
            .and_then(|n| unversioned_name(&n.to_string_lossy(), version, platform))
        else {
            outcomes.push(LinkOutcome::Skipped {
                link: None,
                reason: format!("{} has no versioned name", file.path.display()),
            });
            continue;
        };
        let link = link_dir.join(name);

        if !file.path.exists() {
            outcomes.push(LinkOutcome::Failed {
                link,
                message: format!("{} no longer exists", file.path.display()),
            });
            continue;
        }

        if let Err(e) = fs::create_dir_all(link_dir) {
            outcomes.push(LinkOutcome::Failed {
                link,
                message: e.to_string(),
            });
            continue;
        }

        let outcome = link_one(&file.path, &link);
        match &outcome {
            LinkOutcome::Failed { message, .. } => {
                warn!(link = %link.display(), %message, "Could not create link")
            }
            other => debug!(outcome = ?other, "Library link"),
        }
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(unix)]
fn link_one(target: &Path, link: &Path) -> LinkOutcome {
    use std::os::unix::fs::symlink;

    let failed = |e: std::io::Error| LinkOutcome::Failed {
        link: link.to_path_buf(),
        message: e.to_string(),
    };

    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if fs::read_link(link).ok().as_deref() == Some(target) {
                return LinkOutcome::Unchanged {
                    link: link.to_path_buf(),
                };
            }
            if let Err(e) = fs::remove_file(link) {
                return failed(e);
            }
            match symlink(target, link) {
                Ok(()) => LinkOutcome::Replaced {
                    link: link.to_path_buf(),
                    target: target.to_path_buf(),
                },
                Err(e) => failed(e),
            }
        }
        Ok(_) => LinkOutcome::Skipped {
            link: Some(link.to_path_buf()),
            reason: "a regular file already exists there".to_string(),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => match symlink(target, link) {
            Ok(()) => LinkOutcome::Created {
                link: link.to_path_buf(),
                target: target.to_path_buf(),
            },
            Err(e) => failed(e),
        },
        Err(e) => failed(e),
    }
}

#[cfg(not(unix))]
fn link_one(_target: &Path, link: &Path) -> LinkOutcome {
    LinkOutcome::Skipped {
        link: Some(link.to_path_buf()),
        reason: "symlinks are not supported on this platform".to_string(),
    }
}
