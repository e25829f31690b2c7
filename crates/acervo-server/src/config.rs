//! Server configuration.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `ACERVO_*` environment variables. Later layers override earlier
//! ones.
//!
//! ```toml
//! http_addr = "0.0.0.0:3000"
//! database_path = "db.sqlite"
//! upload_dir = "uploads"
//! max_body_size = 26214400
//!
//! [log]
//! level = "info"
//! json = true
//! ```

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogConfig;

/// Default bind address.
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3000";
/// Default SQLite database path.
const DEFAULT_DATABASE_PATH: &str = "db.sqlite";
/// Default directory for upload scratch files.
const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// Default maximum request body size (25 MB, sized for PDF uploads).
const DEFAULT_MAX_BODY_SIZE: usize = 25 * 1024 * 1024;
/// Default graceful shutdown drain timeout.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override does not parse as the expected type.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Environment variable name.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Runtime configuration for the acervo server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    http_addr: String,
    database_path: PathBuf,
    upload_dir: PathBuf,
    max_body_size: usize,
    shutdown_timeout: Duration,
    log: LogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            log: LogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Loads configuration: defaults, then the file named by `ACERVO_CONFIG`
    /// (or `acervo.toml` when present in the working directory), then
    /// `ACERVO_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = env::var("ACERVO_CONFIG") {
            config.apply_file(Path::new(&path))?;
        } else if Path::new("acervo.toml").exists() {
            config.apply_file(Path::new("acervo.toml"))?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Applies overrides from a TOML file.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw)?;

        if let Some(http_addr) = file.http_addr {
            self.http_addr = http_addr;
        }
        if let Some(database_path) = file.database_path {
            self.database_path = database_path;
        }
        if let Some(upload_dir) = file.upload_dir {
            self.upload_dir = upload_dir;
        }
        if let Some(max_body_size) = file.max_body_size {
            self.max_body_size = max_body_size;
        }
        if let Some(log) = file.log {
            if let Some(level) = log.level {
                self.log.level = level;
            }
            if let Some(json) = log.json {
                self.log.json = json;
            }
        }

        Ok(())
    }

    /// Applies `ACERVO_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(addr) = env::var("ACERVO_HTTP_ADDR") {
            self.http_addr = addr;
        }
        if let Ok(path) = env::var("ACERVO_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("ACERVO_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Ok(size) = env::var("ACERVO_MAX_BODY_SIZE") {
            self.max_body_size = size.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ACERVO_MAX_BODY_SIZE".to_string(),
                value: size,
            })?;
        }
        if let Ok(level) = env::var("ACERVO_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Ok(json) = env::var("ACERVO_LOG_JSON") {
            self.log.json = json.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ACERVO_LOG_JSON".to_string(),
                value: json,
            })?;
        }
        Ok(())
    }

    /// Returns the bind address as configured.
    #[must_use]
    pub fn http_addr(&self) -> &str {
        &self.http_addr
    }

    /// Parses the bind address into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.http_addr.parse()
    }

    /// Returns the SQLite database path.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Returns the directory for upload scratch files.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Returns the maximum request body size in bytes.
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Returns the graceful shutdown drain timeout.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Returns the logging configuration.
    #[must_use]
    pub fn log(&self) -> &LogConfig {
        &self.log
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Sets the bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.http_addr = addr.into();
        self
    }

    /// Sets the SQLite database path.
    #[must_use]
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Sets the upload scratch directory.
    #[must_use]
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    /// Sets the maximum request body size.
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Sets the graceful shutdown drain timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

/// File layer: every field optional so the file only states what it changes.
#[derive(Debug, Deserialize)]
struct FileConfig {
    http_addr: Option<String>,
    database_path: Option<PathBuf>,
    upload_dir: Option<PathBuf>,
    max_body_size: Option<usize>,
    log: Option<FileLogConfig>,
}

#[derive(Debug, Deserialize)]
struct FileLogConfig {
    level: Option<String>,
    json: Option<bool>,
}
