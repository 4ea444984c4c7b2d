//! Server configuration.

use crate::broadcast::DEFAULT_QUEUE_CAPACITY;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Snapshots buffered per viewer before new ones are dropped for it.
    #[serde(default = "default_viewer_queue_capacity")]
    viewer_queue_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_viewer_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            viewer_queue_capacity: default_viewer_queue_capacity(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let origin = path.as_ref().display().to_string();
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) => return Err(ConfigError::new(origin, None, format!("cannot read file: {}", e))),
        };

        let config = Self::parse(&content, &origin)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    #[track_caller]
    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => return Err(ConfigError::new(origin, None, e.message().to_string())),
        };
        if config.viewer_queue_capacity == 0 {
            return Err(ConfigError::new(
                origin,
                Some("viewer_queue_capacity"),
                "must be at least 1",
            ));
        }
        Ok(config)
    }

    /// Replaces the host and port where overrides are given.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error loading the server config, naming where it came from.
#[derive(Debug, Clone, Display, Error)]
#[display("server config {}: {} at {}:{}", origin, message, file, line)]
pub struct ConfigError {
    /// File path, or `<inline>` for text parsed directly.
    pub origin: String,
    /// Offending key, when one setting is at fault.
    pub key: Option<&'static str>,
    /// What was wrong, prefixed with the key if there is one.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(
        origin: impl Into<String>,
        key: Option<&'static str>,
        message: impl Into<String>,
    ) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        Self {
            origin: origin.into(),
            key,
            message: match key {
                Some(key) => format!("{}: {}", key, message),
                None => message,
            },
            line: loc.line(),
            file: loc.file(),
        }
    }
}
