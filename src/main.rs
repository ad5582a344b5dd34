//! tcltk-setup CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tcltk_setup::cli::{Cli, CommandDispatcher, Host};
use tcltk_setup::config::{load_config, DEFAULT_LOG_FILE};
use tcltk_setup::logging::{init_tracing, LogSettings};
use tcltk_setup::shell::is_ci;
use tcltk_setup::ui::{create_ui, should_use_colors, OutputMode, UserInterface};

/// Start tracing, falling back to console-only if the log file cannot be
/// opened.
fn start_logging(cli: &Cli, log_file: Option<PathBuf>, ui: &mut dyn UserInterface) {
    let mut settings = LogSettings {
        debug: cli.debug,
        verbose: cli.verbose,
        ansi: !cli.no_color && should_use_colors(),
        log_file: log_file.filter(|_| cli.writes_log()),
    };
    if let Err(e) = init_tracing(&settings) {
        ui.warning(&format!("Could not open log file: {}", e));
        settings.log_file = None;
        let _ = init_tracing(&settings);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let is_interactive = cli.wants_interactive() && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    let project_root = std::env::current_dir().unwrap_or_default();
    let mut config = match load_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No config to read log_file from; use the flag or the default.
            let log_file = cli
                .log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
            start_logging(&cli, Some(log_file), ui.as_mut());
            tracing::error!("{}", e);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(e.exit_code());
        }
    };
    cli.apply_overrides(&mut config);

    start_logging(&cli, Some(config.log_file()), ui.as_mut());

    tracing::debug!("tcltk-setup starting with args: {:?}", cli);

    let host = match Host::detect(&config, output_mode.shows_command_output()) {
        Ok(host) => host,
        Err(e) => {
            tracing::error!("{}", e);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(e.exit_code());
        }
    };

    let dispatcher = CommandDispatcher::new(&config, &host);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::error!("{}", e);
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}
