//! The `check` command: report without changing anything.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::cli::host::Host;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::locator::Role;
use crate::runner::{ResolutionContext, SetupWorkflow};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// JSON shape of `check --json`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub checked_at: DateTime<Utc>,
    pub ready: bool,
    #[serde(flatten)]
    pub resolution: &'a ResolutionContext,
}

pub struct CheckCommand<'a> {
    config: &'a SetupConfig,
    host: &'a Host,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a Host, args: CheckArgs) -> Self {
        Self { config, host, args }
    }
}

/// Human-readable check output.
pub fn render_check(resolution: &ResolutionContext, ui: &mut dyn UserInterface) {
    ui.show_header(&format!("Tcl/Tk {} check", resolution.supported));

    let verdict = resolution.describe_verdict();
    if resolution.verdict.needs_install() {
        ui.warning(&verdict);
    } else {
        ui.success(&verdict);
    }

    match resolution.package_manager {
        Some(pm) => ui.message(&format!("Package manager: {}", pm)),
        None => ui.message("Package manager: none found"),
    }

    if let Some(location) = &resolution.location {
        for role in [Role::Tcl, Role::Tk] {
            if let Some(dir) = location.runtime(role) {
                ui.message(&format!("{} runtime: {}", role, dir.display()));
            }
        }
    }
    if !resolution.missing.is_empty() {
        ui.warning(&format!("Missing: {}", resolution.missing.join(", ")));
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workflow = SetupWorkflow::new(self.config, self.host.workflow_context());
        let resolution = workflow.check();
        let ready = resolution.is_ready();

        if self.args.json {
            let report = CheckReport {
                checked_at: Utc::now(),
                ready,
                resolution: &resolution,
            };
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            render_check(&resolution, ui);
            if !ready {
                ui.show_hint("Run `tcltk-setup install` to fix this");
            }
        }

        Ok(if ready {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
