//! Recursive, case-insensitive search for required support files.
//!
//! Each root is walked once and every pending pattern is tested against
//! each file name. Entries within a directory are visited in file-name
//! order, so two searches over an unchanged tree give the same answer.
//!
//! Selection per pattern is "first acceptable": the first match whose path
//! contains the target version, or else the first match at all. A pattern
//! no root matches gets one more chance under the plan's fallback root.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::SetupError;
use crate::version::VersionString;

use super::required::{RequiredFile, Role};
use super::roots::SearchPlan;

/// One required file and the path it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub pattern: String,
    pub role: Role,
    pub path: PathBuf,
}

/// Directories (and files) that make up a usable installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    /// Directory of the first resolved Tcl-role file.
    pub tcl_runtime: Option<PathBuf>,

    /// Directory of the first resolved Tk-role file.
    pub tk_runtime: Option<PathBuf>,

    /// Every resolved file, in required-file order.
    pub files: Vec<ResolvedFile>,
}

impl ResolvedLocation {
    /// Runtime directory for a role.
    pub fn runtime(&self, role: Role) -> Option<&Path> {
        match role {
            Role::Tcl => self.tcl_runtime.as_deref(),
            Role::Tk => self.tk_runtime.as_deref(),
        }
    }

    /// Path a pattern resolved to.
    pub fn file(&self, pattern: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.pattern == pattern)
            .map(|f| f.path.as_path())
    }

    /// Directory holding the first resolved header for `role`.
    pub fn include_dir(&self, role: Role) -> Option<&Path> {
        self.files
            .iter()
            .filter(|f| f.role == role)
            .find(|f| f.pattern.to_ascii_lowercase().ends_with(".h"))
            .and_then(|f| f.path.parent())
    }

    /// Paths that no longer exist on disk.
    ///
    /// Resolution only records existing paths, but consumers run later and
    /// must not assume nothing changed in between.
    pub fn stale_paths(&self) -> Vec<&Path> {
        self.tcl_runtime
            .iter()
            .chain(self.tk_runtime.iter())
            .map(PathBuf::as_path)
            .chain(self.files.iter().map(|f| f.path.as_path()))
            .filter(|p| !p.exists())
            .collect()
    }

    fn record(&mut self, file: &RequiredFile, path: PathBuf) {
        if let Some(dir) = path.parent() {
            let slot = match file.role {
                Role::Tcl => &mut self.tcl_runtime,
                Role::Tk => &mut self.tk_runtime,
            };
            if slot.is_none() {
                *slot = Some(dir.to_path_buf());
            }
        }
        self.files.push(ResolvedFile {
            pattern: file.pattern.clone(),
            role: file.role,
            path,
        });
    }
}

/// Some required files did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateFailure {
    /// Target version searched for.
    pub version: String,

    /// Every unresolved pattern, in required-file order.
    pub missing: Vec<String>,

    /// What did resolve, for diagnostics.
    pub partial: ResolvedLocation,
}

impl From<LocateFailure> for SetupError {
    fn from(failure: LocateFailure) -> Self {
        SetupError::LocateFailure {
            version: failure.version,
            missing: failure.missing,
        }
    }
}

/// Resolve every required file under the plan's roots.
///
/// Never fails fast: all patterns are attempted and every miss is reported.
pub fn locate(
    target: &VersionString,
    plan: &SearchPlan,
    required: &[RequiredFile],
) -> Result<ResolvedLocation, LocateFailure> {
    let matchers: Vec<Option<GlobMatcher>> = required.iter().map(compile).collect();
    let mut found: Vec<Vec<PathBuf>> = vec![Vec::new(); required.len()];

    for root in &plan.roots {
        collect_matches(root, &matchers, &mut found, |_| true);
    }

    if let Some(fallback) = &plan.fallback {
        let pending: Vec<bool> = found.iter().map(Vec::is_empty).collect();
        if pending.iter().any(|p| *p) {
            tracing::info!(
                "Falling back to a broader search under {}",
                fallback.display()
            );
            collect_matches(fallback, &matchers, &mut found, |i| pending[i]);
        }
    }

    let mut location = ResolvedLocation::default();
    let mut missing = Vec::new();

    for (file, matches) in required.iter().zip(found) {
        match select(&matches, target) {
            Some(path) => {
                tracing::info!("Resolved {} -> {}", file.pattern, path.display());
                location.record(file, path);
            }
            None => {
                tracing::warn!("No match for {} (Tcl/Tk {})", file.pattern, target);
                missing.push(file.pattern.clone());
            }
        }
    }

    if missing.is_empty() {
        Ok(location)
    } else {
        Err(LocateFailure {
            version: target.to_string(),
            missing,
            partial: location,
        })
    }
}

fn compile(file: &RequiredFile) -> Option<GlobMatcher> {
    match GlobBuilder::new(&file.pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            tracing::warn!("Ignoring invalid pattern '{}': {}", file.pattern, e);
            None
        }
    }
}

/// Walk `root` once, appending matching paths for each pattern `wanted` accepts.
fn collect_matches<F>(
    root: &Path,
    matchers: &[Option<GlobMatcher>],
    found: &mut [Vec<PathBuf>],
    wanted: F,
) where
    F: Fn(usize) -> bool,
{
    if !root.is_dir() {
        tracing::debug!("Skipping missing search root {}", root.display());
        return;
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let name = Path::new(entry.file_name());
        for (i, matcher) in matchers.iter().enumerate() {
            let Some(matcher) = matcher else { continue };
            if wanted(i) && matcher.is_match(name) && entry.path().exists() {
                found[i].push(entry.path().to_path_buf());
            }
        }
    }
}

/// First match containing the target version, else the first match.
fn select(matches: &[PathBuf], target: &VersionString) -> Option<PathBuf> {
    matches
        .iter()
        .find(|p| p.to_string_lossy().contains(target.as_str()))
        .or_else(|| matches.first())
        .cloned()
}
