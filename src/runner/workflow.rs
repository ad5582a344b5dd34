//! The end-to-end setup run.
//!
//! probe → classify → (install → wait for the interpreter) → locate →
//! symlinks → binding → smoke test.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::SetupConfig;
use crate::detection::{PackageManager, VersionProbe};
use crate::error::{Result, SetupError};
use crate::install::{
    binding_invocation, create_links, install_binding, install_runtime, run_smoke_test,
    smoke_invocation, CommandRunner, InstallPlan, LinkOutcome,
};
use crate::locator::{locate, ResolvedLocation};
use crate::shell::HostPlatform;
use crate::ui::{Prompt, UserInterface};
use crate::version::{CompatibilityVerdict, VersionString};

use super::context::ResolutionContext;
use super::retry::resolve_version;

/// Mockable collaborators for a run.
pub struct WorkflowContext<'a> {
    /// Reports the installed interpreter version.
    pub probe: &'a dyn VersionProbe,
    /// Runs one external command.
    pub run_command: CommandRunner<'a>,
    /// Pauses between retry attempts.
    pub sleep: &'a dyn Fn(Duration),
    /// First package manager found on this host.
    pub package_manager: Option<PackageManager>,
    pub platform: HostPlatform,
    /// Whether the process already runs as root.
    pub elevated: bool,
}

/// Per-run switches from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print what would run without changing anything.
    pub dry_run: bool,
    /// Install without asking.
    pub assume_yes: bool,
    pub skip_symlinks: bool,
    pub skip_binding: bool,
    pub skip_smoke_test: bool,
}

/// Runs the setup stages against one configuration.
pub struct SetupWorkflow<'a> {
    config: &'a SetupConfig,
    ctx: WorkflowContext<'a>,
}

impl<'a> SetupWorkflow<'a> {
    pub fn new(config: &'a SetupConfig, ctx: WorkflowContext<'a>) -> Self {
        Self { config, ctx }
    }

    fn new_resolution(&self) -> ResolutionContext {
        let mut resolution =
            ResolutionContext::new(self.ctx.platform, self.config.supported_version.clone());
        resolution.package_manager = self.ctx.package_manager;
        resolution
    }

    /// Probe, classify and locate without changing anything.
    pub fn check(&self) -> ResolutionContext {
        let mut resolution = self.new_resolution();
        resolution.record_probe(self.ctx.probe.probe());
        info!(verdict = ?resolution.verdict, "Probe classified");

        match self.locate(&resolution) {
            Ok(location) => resolution.location = Some(location),
            Err(SetupError::LocateFailure { missing, .. }) => resolution.missing = missing,
            Err(e) => warn!(error = %e, "Locate failed"),
        }
        resolution
    }

    /// The full setup run.
    pub fn run(
        &self,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<ResolutionContext> {
        let supported = &self.config.supported_version;
        ui.show_header(&format!("Tcl/Tk {} setup", supported));
        let mut resolution = self.new_resolution();

        let mut spinner = ui.start_spinner("Probing for a Tcl interpreter");
        let verdict = resolution.record_probe(self.ctx.probe.probe());
        let summary = resolution.describe_verdict();
        info!(?verdict, detected = ?resolution.detected, "Probe classified");
        if verdict == CompatibilityVerdict::Compatible {
            spinner.finish_success(&summary);
        } else {
            spinner.finish_skipped(&summary);
        }

        if verdict.needs_install() {
            let installed = self.install(&mut resolution, options, ui)?;
            if !installed {
                return Ok(resolution);
            }
        }

        let mut spinner = ui.start_spinner("Locating Tcl/Tk support files");
        let location = match self.locate(&resolution) {
            Ok(location) => location,
            Err(e) => {
                spinner.finish_error(&e.to_string());
                if let SetupError::LocateFailure { missing, .. } = &e {
                    resolution.missing = missing.clone();
                }
                error!(error = %e, "Locate failed");
                ui.show_hint("Point --root at the Tcl/Tk install, or set search.roots in the config");
                return Err(e);
            }
        };
        spinner.finish_success(&format!(
            "Found {} support files",
            location.files.len()
        ));
        resolution.location = Some(location.clone());

        for stale in location.stale_paths() {
            warn!(path = %stale.display(), "Located path disappeared");
            ui.warning(&format!("{} no longer exists", stale.display()));
        }

        if options.skip_symlinks || !self.config.symlinks.enabled {
            debug!("Symlinks disabled");
        } else {
            resolution.links = self.link(&location, options, ui);
        }

        if options.skip_binding || !self.config.binding.enabled {
            debug!("Binding install disabled");
        } else {
            self.install_binding(&location, options, ui)?;
        }

        if options.skip_smoke_test || !self.config.smoke_test.enabled {
            debug!("Smoke test disabled");
        } else {
            let version = resolution
                .detected
                .clone()
                .unwrap_or_else(|| resolution.target_version());
            self.smoke_test(&version, options, ui)?;
        }

        if options.dry_run {
            ui.message("Dry run: nothing was changed");
        } else {
            ui.success(&format!("Tcl/Tk {} is ready", supported));
        }
        Ok(resolution)
    }

    /// Install packages and wait for a compatible interpreter.
    ///
    /// Returns `false` for a dry run, after printing the plan.
    fn install(
        &self,
        resolution: &mut ResolutionContext,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        let supported = self.config.supported_version.clone();
        let manager = self
            .ctx
            .package_manager
            .ok_or_else(|| SetupError::NoPackageManager {
                platform: self.ctx.platform.to_string(),
            })?;
        let plan = InstallPlan::for_manager(manager, &supported, self.ctx.elevated);

        if options.dry_run {
            ui.message(&format!("Would install Tcl/Tk {} with {}:", supported, manager));
            for invocation in &plan.install {
                ui.message(&format!("  {}", invocation.display()));
            }
            ui.message("Dry run: nothing was changed");
            return Ok(false);
        }

        if !options.assume_yes {
            let prompt = Prompt::new(
                "install",
                format!("Install Tcl/Tk {} with {}?", supported, manager),
                true,
            );
            if !ui.confirm(&prompt)? {
                ui.show_hint("Install it manually, then run `tcltk-setup check`");
                return Err(SetupError::InstallFailure {
                    manager: manager.to_string(),
                    message: "installation declined".to_string(),
                });
            }
        }

        let mut spinner = ui.start_spinner(&format!("Installing Tcl/Tk {} with {}", supported, manager));
        if let Err(e) = install_runtime(&plan, self.ctx.run_command) {
            spinner.finish_error(&e.to_string());
            return Err(e);
        }
        spinner.finish_success(&format!("Installed with {}", manager));
        resolution.installed = true;

        let mut spinner = ui.start_spinner("Waiting for the new interpreter");
        let version = match resolve_version(
            self.ctx.probe,
            &self.config.retry_policy(),
            self.ctx.sleep,
        ) {
            Ok(version) => version,
            Err(e) => {
                spinner.finish_error(&e.to_string());
                return Err(e);
            }
        };

        let verdict = resolution.record_probe(Some(version.clone()));
        if verdict != CompatibilityVerdict::Compatible {
            let e = SetupError::UnsupportedVersion {
                detected: version.to_string(),
                supported: supported.to_string(),
            };
            spinner.finish_error(&e.to_string());
            return Err(e);
        }
        spinner.finish_success(&resolution.describe_verdict());
        Ok(true)
    }

    fn locate(&self, resolution: &ResolutionContext) -> Result<ResolvedLocation> {
        let plan = self.config.search_plan(self.ctx.platform);
        let required = self.config.required_files(self.ctx.platform);
        debug!(roots = ?plan.roots, fallback = ?plan.fallback, "Search plan");
        locate(&resolution.target_version(), &plan, &required).map_err(SetupError::from)
    }

    fn link(
        &self,
        location: &ResolvedLocation,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Vec<LinkOutcome> {
        let Some(link_dir) = self.config.link_dir(self.ctx.platform) else {
            ui.message("No symlink directory for this platform");
            return Vec::new();
        };

        if options.dry_run {
            ui.message(&format!("Would link shared libraries into {}", link_dir.display()));
            return Vec::new();
        }

        let outcomes = create_links(
            location,
            &self.config.supported_version,
            &link_dir,
            self.ctx.platform,
        );
        for outcome in &outcomes {
            if outcome.is_failure() {
                ui.warning(&outcome.describe());
            } else {
                ui.message(&outcome.describe());
            }
        }
        outcomes
    }

    fn install_binding(
        &self,
        location: &ResolvedLocation,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let invocation = binding_invocation(
            &self.config.binding,
            &self.config.supported_version,
            location,
            self.ctx.platform,
        );
        if options.dry_run {
            ui.message(&format!("Would run: {}", invocation.display()));
            return Ok(());
        }

        let mut spinner =
            ui.start_spinner(&format!("Installing {} binding", self.config.binding.package));
        match install_binding(&invocation, &self.config.binding, self.ctx.run_command) {
            Ok(()) => {
                spinner.finish_success(&format!("Installed {}", self.config.binding.package));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&e.to_string());
                ui.show_hint(&format!("Retry by hand: {}", invocation.display()));
                Err(e)
            }
        }
    }

    fn smoke_test(
        &self,
        version: &VersionString,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let invocation = smoke_invocation(&self.config.smoke_test, version);
        if options.dry_run {
            ui.message(&format!(
                "Would open a test window with {}",
                self.config.smoke_test.program
            ));
            return Ok(());
        }

        let mut spinner = ui.start_spinner("Opening a Tk test window");
        match run_smoke_test(&invocation, self.ctx.run_command) {
            Ok(()) => {
                spinner.finish_success("Tk window opened and closed");
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&e.to_string());
                Err(e)
            }
        }
    }
}
