//! Structured logging setup.
//!
//! The binary calls [`init`] once at startup. `RUST_LOG` wins over the
//! configured level so operators can raise verbosity without touching the
//! config file.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level directive (e.g. "info", "acervo_server=debug").
    pub level: String,
    /// Whether to emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Logging initialization error.
#[derive(Debug, Error)]
#[error("failed to initialize logging: {0}")]
pub struct InitError(String);

/// Installs the global tracing subscriber.
pub fn init(config: &LogConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InitError(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| InitError(e.to_string()))
}
