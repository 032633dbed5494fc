//! Logging setup
//!
//! Log lines go to stdout and are appended to a persistent file. The file
//! layer adds source file and line so failures can be traced after the
//! fact.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file used when `LOG_FILE` is not set
pub const DEFAULT_LOG_FILE: &str = "program.log";

const DEFAULT_FILTER: &str = "homework_bot=debug,homework_client=info";

/// Path of the persistent log sink
pub fn log_path() -> PathBuf {
    std::env::var("LOG_FILE")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Installs the global subscriber
///
/// If the log file cannot be opened the bot still starts, logging to
/// stdout only.
pub fn init(log_file: &Path) {
    let (file_layer, file_error) = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        warn!(
            "Cannot open log file {}, logging to stdout only: {}",
            log_file.display(),
            e
        );
    }
}
