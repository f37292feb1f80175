//! File logging for the table UI.
//!
//! Anything written to stdout or stderr would land on top of the alternate
//! screen, so every event goes to a daily rolling file instead. `RUST_LOG`
//! overrides the level; otherwise `lazytable=info,warn` applies.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "lazytable=info,warn";

/// Prefix of the rolled log files (`lazytable.log.YYYY-MM-DD`).
const LOG_FILE_PREFIX: &str = "lazytable.log";

/// Install the global file subscriber.
///
/// Files are written under `<data_local_dir>/lazytable/logs/`, for example
/// `~/.local/share/lazytable/logs/` on Linux.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already installed.
pub fn init() -> anyhow::Result<PathBuf> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(build_filter(std::env::var("RUST_LOG").ok().as_deref()));

    tracing::subscriber::set_global_default(subscriber)
        .context("A global tracing subscriber is already installed")?;

    debug!(log_dir = %log_dir.display(), "File logging enabled");
    Ok(log_dir)
}

/// Parse a filter directive, falling back to the default on absence or error.
fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Record the effective settings the table starts with.
pub fn log_startup(settings: &Settings) {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tick_rate_ms = settings.tick_rate_ms,
        view = settings.view.label(),
        id_strategy = ?settings.id_strategy,
        fixtures = settings.load_fixtures,
        auto_save = settings.auto_save,
        "LazyTable starting"
    );
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("lazytable").join("logs"))
}

/// Get the path where logs are stored.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Record how the session ended.
pub fn shutdown(clean: bool) {
    if clean {
        info!("LazyTable shutting down");
    } else {
        warn!("LazyTable shutting down after an error");
    }
}
