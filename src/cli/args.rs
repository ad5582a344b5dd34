//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::SetupConfig;
use crate::version::SupportedVersion;

/// tcltk-setup - Install and wire up a compatible Tcl/Tk.
#[derive(Debug, Parser)]
#[command(name = "tcltk-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Extra config file, merged over the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Append log lines to this file (default: tcltk-setup.log)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tcl/Tk major.minor to install (default: 8.6)
    #[arg(long, global = true, value_name = "MAJOR.MINOR")]
    pub tcl_version: Option<SupportedVersion>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Apply global flags that override configuration.
    pub fn apply_overrides(&self, config: &mut SetupConfig) {
        if let Some(version) = &self.tcl_version {
            config.supported_version = version.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }

    /// Whether this command appends to the log file. Completion scripts are
    /// pure output and leave no log behind.
    pub fn writes_log(&self) -> bool {
        !matches!(self.command, Some(Commands::Completions(_)))
    }

    /// Whether prompts may be shown.
    pub fn wants_interactive(&self) -> bool {
        match &self.command {
            Some(Commands::Install(args)) => !args.non_interactive,
            _ => true,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install and configure Tcl/Tk (default if no command specified)
    Install(InstallArgs),

    /// Report the installed version and support files without changing anything
    Check(CheckArgs),

    /// Search for the Tcl/Tk support files
    Locate(LocateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Install without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the commands that would run without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not create unversioned library links
    #[arg(long)]
    pub skip_symlinks: bool,

    /// Do not install the language binding
    #[arg(long)]
    pub skip_binding: bool,

    /// Do not open the test window
    #[arg(long)]
    pub skip_smoke_test: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print a JSON report
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocateArgs {
    /// Search root (repeatable; replaces the configured roots)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Broader root searched for anything the roots did not yield
    #[arg(long, value_name = "DIR")]
    pub fallback: Option<PathBuf>,

    /// Print a JSON report
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["tcltk-setup"]);
        assert!(cli.command.is_none());
        assert!(cli.wants_interactive());
    }

    #[test]
    fn completions_skip_the_log_file() {
        let cli = Cli::parse_from(["tcltk-setup", "completions", "bash"]);
        assert!(!cli.writes_log());

        let cli = Cli::parse_from(["tcltk-setup", "check"]);
        assert!(cli.writes_log());
        assert!(Cli::parse_from(["tcltk-setup"]).writes_log());
    }

    #[test]
    fn install_flags_parse() {
        let cli = Cli::parse_from([
            "tcltk-setup",
            "install",
            "--yes",
            "--dry-run",
            "--non-interactive",
            "--skip-binding",
        ]);
        match &cli.command {
            Some(Commands::Install(args)) => {
                assert!(args.yes);
                assert!(args.dry_run);
                assert!(args.skip_binding);
                assert!(!args.skip_symlinks);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.wants_interactive());
    }

    #[test]
    fn locate_roots_repeat() {
        let cli = Cli::parse_from([
            "tcltk-setup",
            "locate",
            "--root",
            "/opt/a",
            "--root",
            "/opt/b",
            "--fallback",
            "/opt",
        ]);
        match cli.command {
            Some(Commands::Locate(args)) => {
                assert_eq!(args.roots, vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]);
                assert_eq!(args.fallback, Some(PathBuf::from("/opt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tcltk-setup", "check", "--json", "--tcl-version", "8.7"]);
        assert_eq!(cli.tcl_version.as_ref().map(|v| v.as_str()), Some("8.7"));
    }

    #[test]
    fn bad_tcl_version_rejected() {
        let result = Cli::try_parse_from(["tcltk-setup", "--tcl-version", "eight"]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_apply_to_config() {
        let cli = Cli::parse_from([
            "tcltk-setup",
            "--tcl-version",
            "8.7",
            "--log-file",
            "/tmp/setup.log",
        ]);
        let mut config = SetupConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.supported_version.as_str(), "8.7");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/setup.log")));
    }
}
