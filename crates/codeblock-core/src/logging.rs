//! Tracing setup.
//!
//! The viewer owns the terminal, so logs go to a file under
//! `${CODEBLOCK_HOME}/logs` instead of stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `codeblock_tui=trace`).
pub const LOG_ENV: &str = "CODEBLOCK_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "codeblock.log";

/// Installs the global subscriber writing to `dir/codeblock.log`.
///
/// Keep the returned guard alive for the whole program; dropping it flushes
/// and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
