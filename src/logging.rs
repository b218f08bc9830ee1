//! File logging for the terminal binary.
//!
//! The renderer owns the terminal, so log output goes to
//! `<dir>/blockfall.log` through a non-blocking writer. `RUST_LOG` filters as
//! usual, defaulting to `info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "blockfall.log";

/// Install the global subscriber writing into `dir`.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the writer thread.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(file = %dir.join(LOG_FILE_NAME).display(), "logging initialized");
    Ok(guard)
}
