//! The `install` command: the full setup run.

use crate::cli::args::InstallArgs;
use crate::cli::host::Host;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::runner::{RunOptions, SetupWorkflow};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct InstallCommand<'a> {
    config: &'a SetupConfig,
    host: &'a Host,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a Host, args: InstallArgs) -> Self {
        Self { config, host, args }
    }

    fn build_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.args.dry_run,
            assume_yes: self.args.yes,
            skip_symlinks: self.args.skip_symlinks,
            skip_binding: self.args.skip_binding,
            skip_smoke_test: self.args.skip_smoke_test,
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workflow = SetupWorkflow::new(self.config, self.host.workflow_context());
        workflow.run(&self.build_options(), ui)?;
        Ok(CommandResult::success())
    }
}
