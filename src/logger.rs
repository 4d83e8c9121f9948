//! Debug logging support for sedline
//!
//! Logging is off unless requested with `--debug` or `[logging] debug = true`.
//! Logs are appended to ~/.sedline/sedline.log; `SEDLINE_LOG` overrides the
//! filter (default `sedline=debug`).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

pub const LOG_FILTER_ENV: &str = "SEDLINE_LOG";

/// Initialize the debug logging system
///
/// Returns the path to the log file, or None if logging is not enabled or
/// could not be set up. Setup failures are reported as a warning on stderr;
/// logging never stops an edit.
pub fn init_debug_logging(debug_enabled: bool) -> Option<PathBuf> {
    if !debug_enabled {
        return None;
    }

    let result = log_file_path().and_then(|log_path| {
        init_file_logging(&log_path)?;
        Ok(log_path)
    });

    match result {
        Ok(log_path) => Some(log_path),
        Err(e) => {
            eprintln!("sedline: warning: could not enable debug logging: {:#}", e);
            None
        }
    }
}

/// Install the global subscriber writing to `log_path`
fn init_file_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false),
        )
        .with(log_filter());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("sedline=debug"))
}

/// Get the log file path
pub fn log_file_path() -> Result<PathBuf> {
    Ok(crate::config::sedline_dir()?.join("sedline.log"))
}
