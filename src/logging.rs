//! tracing subscriber setup.
//!
//! The filter comes from `CELLPICK_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `warn`. The TUI owns the terminal, so it only logs when
//! pointed at a file.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "CELLPICK_LOG";
const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },
    #[error("logging already initialized: {0}")]
    AlreadySet(#[from] tracing_subscriber::util::TryInitError),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
pub fn init(target: LogTarget<'_>) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry();
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(env_filter());
            registry.with(layer).try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::LogFile {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter());
            registry.with(layer).try_init()?;
            Ok(())
        }
    }
}
