//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`host`] - Real process, probe and sleep wiring for commands

pub mod args;
pub mod commands;
pub mod host;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, InstallArgs, LocateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use host::Host;
