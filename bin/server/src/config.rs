//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested sections (`GITHUB__CLIENT_ID`, `SESSION__MAX_AGE_DAYS`).
//!
//! See [`ProviderConfig`](cito_platform_access::ProviderConfig) for the
//! identity provider settings.

use cito_platform_access::ProviderConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Socket address the HTTP listener binds to.
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    /// Upper bound on pooled database connections.
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// GitHub OAuth configuration.
    pub github: ProviderConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_server_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of the session cookie in days.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// Whether to set the Secure flag on the session cookie (requires HTTPS).
    #[serde(default)]
    pub secure_cookies: bool,

    /// The `state` value sent with every authorization request.
    #[serde(default = "default_state_token")]
    pub state_token: String,
}

fn default_max_age_days() -> i64 {
    7
}

fn default_state_token() -> String {
    "state".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            secure_cookies: false,
            state_token: default_state_token(),
        }
    }
}

impl SessionConfig {
    /// Returns the cookie lifetime.
    #[must_use]
    pub fn max_age(&self) -> time::Duration {
        time::Duration::days(self.max_age_days)
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::default()
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_age_days, 7);
        assert!(!config.secure_cookies);
        assert_eq!(config.state_token, "state");
        assert_eq!(config.max_age().whole_seconds(), 604_800);
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = ServerConfig::from_source(environment(&[
            ("DATABASE_URL", "postgres://localhost/cito"),
            ("GITHUB__CLIENT_ID", "client-id"),
            ("GITHUB__CLIENT_SECRET", "client-secret"),
            (
                "GITHUB__REDIRECT_URL",
                "http://127.0.0.1:8080/oauth2/callback",
            ),
        ]))
        .expect("config");

        assert_eq!(config.database_url, "postgres://localhost/cito");
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.github.client_id(), "client-id");
        assert_eq!(config.github.scopes(), vec!["user:email"]);
        assert_eq!(config.session.max_age_days, 7);
    }

    #[test]
    fn nested_overrides_are_applied() {
        let config = ServerConfig::from_source(environment(&[
            ("DATABASE_URL", "postgres://localhost/cito"),
            ("SERVER_ADDR", "0.0.0.0:9000"),
            ("GITHUB__CLIENT_ID", "client-id"),
            ("GITHUB__CLIENT_SECRET", "client-secret"),
            ("GITHUB__REDIRECT_URL", "https://cito.example/oauth2/callback"),
            ("GITHUB__API_BASE_URL", "https://ghe.example/api/v3"),
            ("SESSION__MAX_AGE_DAYS", "1"),
            ("SESSION__SECURE_COOKIES", "true"),
        ]))
        .expect("config");

        assert_eq!(config.server_addr, "0.0.0.0:9000");
        assert_eq!(config.github.user_url(), "https://ghe.example/api/v3/user");
        assert_eq!(config.session.max_age_days, 1);
        assert!(config.session.secure_cookies);
    }

    #[test]
    fn missing_client_id_is_an_error() {
        let result = ServerConfig::from_source(environment(&[
            ("DATABASE_URL", "postgres://localhost/cito"),
            ("GITHUB__CLIENT_SECRET", "client-secret"),
            ("GITHUB__REDIRECT_URL", "http://localhost/cb"),
        ]));
        assert!(result.is_err());
    }
}
