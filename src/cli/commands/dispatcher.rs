//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, InstallArgs};
use crate::cli::host::Host;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    config: &'a SetupConfig,
    host: &'a Host,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a Host) -> Self {
        Self { config, host }
    }

    /// Route the CLI subcommand to its implementation and run it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(self.config, self.host, args.clone())
                    .execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(self.config, self.host, args.clone()).execute(ui)
            }
            Some(Commands::Locate(args)) => {
                super::locate::LocateCommand::new(self.config, self.host.platform, args.clone())
                    .execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::install::InstallCommand::new(
                self.config,
                self.host,
                InstallArgs::default(),
            )
            .execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }
}
