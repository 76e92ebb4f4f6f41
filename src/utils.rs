//! Utility functions used throughout the application

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("rmcat-debug.log");
    path
}

/// Install the tracing subscriber.
///
/// The terminal belongs to the TUI, so logs only go to the debug log file.
/// Without `debug` nothing is installed and all events are dropped.
/// `RUST_LOG` overrides the default `rmcat=debug` filter.
pub fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(get_debug_log_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rmcat=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;

    Ok(())
}
