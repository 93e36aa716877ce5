//! Structured logging setup
//!
//! Initializes the tracing subscriber for GameGuide binaries and examples.
//! Library code only emits `tracing` events; subscriber installation is the
//! application's responsibility.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the tracing subscriber
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to initialize logging: {0}")]
    InitFailed(String),
}

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    Text,
    /// JSON output for log aggregation
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Install the global tracing subscriber
///
/// The level in `config` acts as a default and can be overridden per module
/// through the `RUST_LOG` environment variable.
///
/// # Errors
///
/// Returns `InitFailed` if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let result = match config.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::InitFailed(e.to_string()))
}
