//! Diagnostic logging.
//!
//! The terminal belongs to the UI, so log output only goes to a file: the
//! `--log-file` path, else `JLV_LOG_FILE`. With neither set no subscriber is
//! installed and every `tracing` call is a no-op.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const LOG_FILE_ENV: &str = "JLV_LOG_FILE";

/// Log file to use, preferring the explicit path over the environment.
pub fn resolve_log_file(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
        .filter(|p| !p.as_os_str().is_empty())
}

/// Install the global subscriber. Level comes from `RUST_LOG` (default `info`).
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let Some(path) = resolve_log_file(log_file) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
