//! Everything that changes the host: package installs, library links, the
//! language binding and the final smoke test.
//!
//! Commands are run through an injected runner so the workflow can be
//! exercised without touching the system.

pub mod binding;
pub mod packages;
pub mod smoke;
pub mod symlinks;

pub use binding::{binding_invocation, install_binding};
pub use packages::{packages, InstallPlan};
pub use smoke::{run_smoke_test, smoke_invocation};
pub use symlinks::{create_links, LinkOutcome};

use tracing::{info, warn};

use crate::error::{Result, SetupError};
use crate::shell::{CommandResult, Invocation};

/// Runs one external command.
pub type CommandRunner<'a> = &'a dyn Fn(&Invocation) -> Result<CommandResult>;

/// Run `invocation` and turn anything but a clean exit into a message.
pub(crate) fn run_checked(run: CommandRunner<'_>, invocation: &Invocation) -> std::result::Result<(), String> {
    info!(command = %invocation.display(), "Running");
    match run(invocation) {
        Ok(result) if result.success => Ok(()),
        Ok(result) => Err(format!(
            "`{}` failed: {}",
            invocation.display(),
            result.failure_summary()
        )),
        Err(e) => Err(e.to_string()),
    }
}

/// Run every install command in order.
///
/// On the first failure the rollback commands run best-effort and the
/// install is reported as failed.
pub fn install_runtime(plan: &InstallPlan, run: CommandRunner<'_>) -> Result<()> {
    for invocation in &plan.install {
        if let Err(message) = run_checked(run, invocation) {
            warn!(manager = %plan.manager, %message, "Install failed, rolling back");
            rollback(plan, run);
            return Err(SetupError::InstallFailure {
                manager: plan.manager.to_string(),
                message,
            });
        }
    }
    info!(manager = %plan.manager, "Tcl/Tk packages installed");
    Ok(())
}

/// Undo a partial install. Failures are logged and otherwise ignored.
pub fn rollback(plan: &InstallPlan, run: CommandRunner<'_>) {
    for invocation in &plan.rollback {
        if let Err(message) = run_checked(run, invocation) {
            warn!(%message, "Rollback step failed");
        }
    }
}
