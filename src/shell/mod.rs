//! External command execution and host platform queries.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_quiet, execute_streaming, CommandOptions, CommandResult,
    Invocation, OutputCallback, OutputLine,
};
pub use platform::{is_ci, is_elevated, HostPlatform};
