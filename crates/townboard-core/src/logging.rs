//! Logging setup for townboard.
//!
//! Small wrapper around `tracing-subscriber` shared by the binaries. The
//! `RUST_LOG` environment variable overrides the configured default level.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to set the global subscriber (usually: already initialized).
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Output format for log messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format (default).
    #[default]
    Compact,
    /// JSON format for structured collection.
    Json,
}

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// The default log level when `RUST_LOG` is not set.
    pub default_level: Level,
    /// Output format for log messages.
    pub format: LogFormat,
    /// Whether to include the target (module path) in logs.
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            format: LogFormat::Compact,
            include_target: false,
        }
    }
}

impl LogConfig {
    /// Config for `--debug` runs: everything at debug, with targets.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            default_level: Level::DEBUG,
            format: LogFormat::Compact,
            include_target: true,
        }
    }
}

/// Initializes tracing with the given configuration.
///
/// Call once at the start of the application.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_logging(config: LogConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("townboard={}", config.default_level)));

    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .compact()
                    .with_target(config.include_target),
            );
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer().json().with_target(config.include_target),
            );
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
