//! Application logging
//!
//! Installs the tracing subscriber: human readable output on stderr and,
//! when asked for, a copy in ~/.config/glyph-xray/logs/.

use crate::core::config_file::ConfigFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Name of today's log file
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("glyph-xray-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(current_log_file_name())
}

/// `RUST_LOG` if set, otherwise `info`, or `debug` when verbose
pub fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped, so keep it alive
/// until the run is over.
pub fn init_logging(verbose: bool, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = if log_to_file {
        let dir = logs_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create logs directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::never(&dir, current_log_file_name());
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;

    if log_to_file {
        tracing::info!("Logging to {}", current_log_file().display());
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_dated() {
        let name = current_log_file_name();
        assert!(name.starts_with("glyph-xray-20"));
        assert!(name.ends_with(".log"));
        assert!(current_log_file().ends_with(format!("logs/{name}")));
    }
}
