//! Logging setup for the library's consumers.
//!
//! Two layers share one `EnvFilter` (default `info`, overridable with
//! `RUST_LOG`):
//! - a plain-text file layer, written through a non-blocking appender to a
//!   log file that is truncated at the start of each run
//! - a stderr layer, so stdout stays free for JSON and NDJSON output

use crate::config::LoggingSettings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Errors while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create the log directory and truncate the log file.
///
/// Returns the full path of the log file.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, LoggingError> {
    let path = log_dir.join(log_file);
    let io_err = |source| LoggingError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(log_dir).map_err(io_err)?;
    fs::write(&path, "").map_err(io_err)?;
    Ok(path)
}

/// Install the global subscriber writing to `log_dir/log_file` and stderr.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, LoggingError> {
    let path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(true)
        .compact();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path,
    })
}

/// [`init_logging`] with the `[logging]` section of the config file.
pub fn init_from_settings(settings: &LoggingSettings) -> Result<LoggingGuard, LoggingError> {
    init_logging(&settings.directory, &settings.file)
}
