//! OAuth identity provider configuration.
//!
//! Defaults target GitHub; every endpoint can be overridden so the same
//! client talks to GitHub Enterprise or a local test double.

use serde::{Deserialize, Serialize};

/// Configuration for the OAuth identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URL for the OAuth2 callback (e.g., "http://127.0.0.1:8080/oauth2/callback").
    redirect_url: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "user:email"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Authorization endpoint the browser is sent to.
    #[serde(default = "default_auth_url")]
    auth_url: String,
    /// Token endpoint used for the code exchange.
    #[serde(default = "default_token_url")]
    token_url: String,
    /// Base URL of the provider's REST API (`/user`, `/user/emails`).
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    /// Deadline for each outbound provider call, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    request_timeout_seconds: u64,
}

fn default_scopes() -> String {
    "user:email".to_string()
}

fn default_auth_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl ProviderConfig {
    /// Creates a new provider configuration with defaults for optional fields.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_url,
            scopes: default_scopes(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> ProviderConfigBuilder {
        ProviderConfigBuilder::new(client_id, client_secret, redirect_url)
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 redirect URL.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the authorization endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the "current user" endpoint.
    #[must_use]
    pub fn user_url(&self) -> String {
        format!("{}/user", self.api_base_url.trim_end_matches('/'))
    }

    /// Returns the "user emails" endpoint.
    #[must_use]
    pub fn emails_url(&self) -> String {
        format!("{}/user/emails", self.api_base_url.trim_end_matches('/'))
    }

    /// Returns the per-call deadline.
    #[must_use]
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Builder for `ProviderConfig`.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
    scopes: Vec<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            config: ProviderConfig::new(client_id, client_secret, redirect_url),
            scopes: vec![default_scopes()],
        }
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: String) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Sets the authorization endpoint.
    #[must_use]
    pub fn auth_url(mut self, url: String) -> Self {
        self.config.auth_url = url;
        self
    }

    /// Sets the token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: String) -> Self {
        self.config.token_url = url;
        self
    }

    /// Sets the REST API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: String) -> Self {
        self.config.api_base_url = url;
        self
    }

    /// Sets the per-call deadline in seconds.
    #[must_use]
    pub fn request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.request_timeout_seconds = seconds;
        self
    }

    /// Builds the `ProviderConfig`.
    #[must_use]
    pub fn build(mut self) -> ProviderConfig {
        self.config.scopes = self.scopes.join(",");
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProviderConfig {
        ProviderConfig::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://127.0.0.1:8080/oauth2/callback".to_string(),
        )
    }

    #[test]
    fn new_config_has_github_defaults() {
        let config = sample();

        assert_eq!(config.client_id(), "client-id");
        assert_eq!(config.client_secret(), "client-secret");
        assert_eq!(config.redirect_url(), "http://127.0.0.1:8080/oauth2/callback");
        assert_eq!(config.scopes(), vec!["user:email"]);
        assert_eq!(config.auth_url(), "https://github.com/login/oauth/authorize");
        assert_eq!(
            config.token_url(),
            "https://github.com/login/oauth/access_token"
        );
        assert_eq!(config.user_url(), "https://api.github.com/user");
        assert_eq!(config.emails_url(), "https://api.github.com/user/emails");
        assert_eq!(config.request_timeout(), std::time::Duration::from_secs(10));
    }

    #[test]
    fn builder_allows_customization() {
        let config = ProviderConfig::builder(
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://localhost/cb".to_string(),
        )
        .add_scope("read:user".to_string())
        .api_base_url("http://127.0.0.1:9999/api/".to_string())
        .request_timeout_seconds(3)
        .build();

        assert_eq!(config.scopes(), vec!["user:email", "read:user"]);
        assert_eq!(config.user_url(), "http://127.0.0.1:9999/api/user");
        assert_eq!(config.request_timeout(), std::time::Duration::from_secs(3));
    }

    #[test]
    fn builder_add_scope_does_not_duplicate() {
        let config = ProviderConfig::builder(
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://localhost/cb".to_string(),
        )
        .add_scope("user:email".to_string())
        .build();

        assert_eq!(config.scopes(), vec!["user:email"]);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_url": "http://127.0.0.1:8080/oauth2/callback"
        }"#;

        let config: ProviderConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.client_id(), "my-client");
        assert_eq!(config.scopes(), vec!["user:email"]);
        assert_eq!(config.user_url(), "https://api.github.com/user");
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_url": "http://localhost/cb",
            "scopes": "user:email, read:user,"
        }"#;

        let config: ProviderConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.scopes(), vec!["user:email", "read:user"]);
    }
}
