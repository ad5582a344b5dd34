//! State threaded through one run.

use serde::Serialize;

use crate::detection::PackageManager;
use crate::install::LinkOutcome;
use crate::locator::ResolvedLocation;
use crate::shell::HostPlatform;
use crate::version::{classify, CompatibilityVerdict, SupportedVersion, VersionString};

/// Everything learned so far about the host's Tcl/Tk.
///
/// Each stage reads what earlier stages recorded and adds its own result;
/// `check --json` serializes it as the report.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionContext {
    pub platform: HostPlatform,
    pub supported: SupportedVersion,
    pub detected: Option<VersionString>,
    pub verdict: CompatibilityVerdict,
    pub package_manager: Option<PackageManager>,
    /// Whether this run installed packages.
    pub installed: bool,
    pub location: Option<ResolvedLocation>,
    /// Patterns the locator could not resolve.
    pub missing: Vec<String>,
    pub links: Vec<LinkOutcome>,
}

impl ResolutionContext {
    pub fn new(platform: HostPlatform, supported: SupportedVersion) -> Self {
        Self {
            platform,
            supported,
            detected: None,
            verdict: CompatibilityVerdict::NotFound,
            package_manager: None,
            installed: false,
            location: None,
            missing: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Store a probe result and its classification.
    pub fn record_probe(&mut self, detected: Option<VersionString>) -> CompatibilityVerdict {
        self.verdict = classify(detected.as_ref(), &self.supported);
        self.detected = detected;
        self.verdict
    }

    /// Human-readable verdict.
    pub fn describe_verdict(&self) -> String {
        self.verdict
            .describe(self.detected.as_ref(), &self.supported)
    }

    /// The version the locator filters on.
    pub fn target_version(&self) -> VersionString {
        self.supported.as_version()
    }

    /// Compatible and every support file located.
    pub fn is_ready(&self) -> bool {
        self.verdict == CompatibilityVerdict::Compatible
            && self.location.is_some()
            && self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_not_found() {
        let ctx = ResolutionContext::new(HostPlatform::Linux, SupportedVersion::default());
        assert_eq!(ctx.verdict, CompatibilityVerdict::NotFound);
        assert!(!ctx.is_ready());
    }

    #[test]
    fn record_probe_classifies() {
        let mut ctx = ResolutionContext::new(HostPlatform::Linux, SupportedVersion::default());

        let verdict = ctx.record_probe(VersionString::parse("9.0.5"));
        assert_eq!(verdict, CompatibilityVerdict::UnsupportedMajorNine);

        let verdict = ctx.record_probe(VersionString::parse("8.6.13"));
        assert_eq!(verdict, CompatibilityVerdict::Compatible);
        assert_eq!(ctx.detected.as_ref().map(|v| v.as_str()), Some("8.6.13"));
    }

    #[test]
    fn ready_needs_location() {
        let mut ctx = ResolutionContext::new(HostPlatform::Linux, SupportedVersion::default());
        ctx.record_probe(VersionString::parse("8.6.13"));
        assert!(!ctx.is_ready());

        ctx.location = Some(ResolvedLocation::default());
        assert!(ctx.is_ready());
    }

    #[test]
    fn serializes_as_report() {
        let mut ctx = ResolutionContext::new(HostPlatform::Linux, SupportedVersion::default());
        ctx.record_probe(VersionString::parse("8.6.13"));

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["supported"], "8.6");
        assert_eq!(json["detected"], "8.6.13");
        assert_eq!(json["verdict"], "compatible");
        assert_eq!(json["platform"], "linux");
    }

    #[test]
    fn target_is_supported_version() {
        let ctx = ResolutionContext::new(HostPlatform::Linux, SupportedVersion::default());
        assert_eq!(ctx.target_version().as_str(), "8.6");
    }
}
