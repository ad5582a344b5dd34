//! Tracing setup.
//!
//! Two layers: a console layer on stderr whose level follows `--debug` or
//! `RUST_LOG`, and an append-only file layer that always records debug
//! output, so a failed run can be reconstructed from the log.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Logging choices made from CLI flags and config.
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub debug: bool,
    pub verbose: bool,
    pub ansi: bool,
    pub log_file: Option<PathBuf>,
}

fn console_filter(settings: &LogSettings) -> EnvFilter {
    if settings.debug {
        EnvFilter::new("tcltk_setup=debug")
    } else if settings.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tcltk_setup=info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tcltk_setup=warn"))
    }
}

/// Open the log file for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(settings.ansi)
        .with_filter(console_filter(settings));

    let file = match &settings.log_file {
        Some(path) => {
            let handle = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(handle))
                    .with_ansi(false)
                    .with_filter(EnvFilter::new("tcltk_setup=debug")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}
