//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout stays valid JSON. When `MOVEXPLAINER_LOG_DIR`
//! is set they go to a daily rolling file in that directory instead.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the rolling log files.
const LOG_FILE_PREFIX: &str = "movexplainer";

/// Get the log directory.
///
/// Priority:
/// 1. `MOVEXPLAINER_LOG_DIR` env variable if set and non-empty
/// 2. `None`: log to stderr
pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var("MOVEXPLAINER_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(env_filter())
            .init();
        return Ok(None);
    };

    let (non_blocking, guard) = file_writer(dir)?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(env_filter())
        .init();

    Ok(Some(guard))
}

fn file_writer(dir: &Path) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(file_appender))
}
