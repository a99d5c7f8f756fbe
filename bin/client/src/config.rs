//! Client configuration.
//!
//! Loaded from `CITO_CLIENT_*` environment variables via the `config` crate.

use serde::Deserialize;
use std::time::Duration;

/// Where to connect and how long to wait for the handshake.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// WebSocket endpoint of the server's echo channel.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// Deadline for the opening handshake, in seconds.
    #[serde(default = "default_handshake_timeout_seconds")]
    pub handshake_timeout_seconds: u64,
}

fn default_ws_url() -> String {
    "ws://127.0.0.1:8080/ws".to_string()
}

fn default_handshake_timeout_seconds() -> u64 {
    45
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            handshake_timeout_seconds: default_handshake_timeout_seconds(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `ws_url` with the default handshake deadline.
    #[must_use]
    pub fn new(ws_url: String) -> Self {
        Self {
            ws_url,
            ..Self::default()
        }
    }

    /// Returns the handshake deadline.
    #[must_use]
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_seconds)
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(environment())
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CITO_CLIENT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
