//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by the
//! [`CommandDispatcher`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod locate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
