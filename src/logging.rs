use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log filter directives, e.g. `PROJECTUST_LOG=projectust=debug`.
pub const LOG_ENV: &str = "PROJECTUST_LOG";

/// Returns the path of the log file (`projectust.log` in the local data dir).
pub fn log_path() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("projectust");
    p.push("projectust.log");
    p
}

/// Installs the global subscriber.
///
/// Events always go to the log file so the TUI screen stays clean.
/// With `verbose`, they are mirrored to stderr as well.
pub fn init_logging(verbose: bool) -> Result<()> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
    let stderr_layer = verbose.then(|| fmt::layer().with_writer(io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
