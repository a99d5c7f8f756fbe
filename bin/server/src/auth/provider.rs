//! Identity provider client.
//!
//! Builds authorization URLs, exchanges codes for access tokens and fetches
//! the signed-in user's profile. All network I/O goes through a
//! [`ProviderTransport`] so the client can be driven by a scripted double in
//! tests.

use async_trait::async_trait;
use cito_platform_access::{
    ProviderConfig, ProviderEmail, ProviderError, RemoteIdentity, select_primary_email,
};
use oauth2::{AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope, basic::BasicClient};
use rootcause::Report;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// An access token granted by the provider.
#[derive(Clone)]
pub struct ProviderToken(String);

impl ProviderToken {
    /// Wraps a token value.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the secret value.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ProviderToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProviderToken(<redacted>)")
    }
}

/// Raw response from an authenticated API call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network seam between the client and the provider.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// Trades an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<ProviderToken, Report<ProviderError>>;

    /// Issues a GET to `url` authenticated with `access_token`.
    ///
    /// Transport failures and timeouts are reported as
    /// `ProviderError::ProfileFetch`; any HTTP status is returned as-is.
    async fn get_authenticated(
        &self,
        url: &str,
        access_token: &ProviderToken,
    ) -> Result<ProviderResponse, Report<ProviderError>>;
}

/// Client for the OAuth identity provider.
#[derive(Clone)]
pub struct IdentityProviderClient {
    config: ProviderConfig,
    transport: Arc<dyn ProviderTransport>,
}

impl IdentityProviderClient {
    /// Creates a client that performs I/O through `transport`.
    pub fn new(config: ProviderConfig, transport: Arc<dyn ProviderTransport>) -> Self {
        Self { config, transport }
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Builds the URL the browser is sent to for consent.
    ///
    /// Pure: performs no I/O. The URL carries the client id, redirect URL,
    /// configured scopes and `state` as query parameters.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Exchange` if the configured endpoints are not
    /// valid URLs.
    pub fn authorization_url(&self, state: &str) -> Result<String, Report<ProviderError>> {
        let auth_url = AuthUrl::new(self.config.auth_url().to_string())
            .map_err(|e| invalid_config("auth URL", e))?;
        let redirect_url = RedirectUrl::new(self.config.redirect_url().to_string())
            .map_err(|e| invalid_config("redirect URL", e))?;

        let client = BasicClient::new(ClientId::new(self.config.client_id().to_string()))
            .set_client_secret(ClientSecret::new(self.config.client_secret().to_string()))
            .set_auth_uri(auth_url)
            .set_redirect_uri(redirect_url);

        let state = state.to_string();
        let mut request = client.authorize_url(move || CsrfToken::new(state));
        for scope in self.config.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let (url, _) = request.url();
        Ok(url.to_string())
    }

    /// Trades an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Exchange` if the provider rejects the code or
    /// cannot be reached.
    pub async fn exchange_code(&self, code: &str) -> Result<ProviderToken, Report<ProviderError>> {
        self.transport.exchange_code(code).await
    }

    /// Fetches the profile of the user the token belongs to.
    ///
    /// When the profile hides the email address, it is backfilled from the
    /// first primary entry of the emails listing.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ProfileFetch` if either call fails or returns
    /// an unparseable body, and `ProviderError::NoPrimaryEmail` if no listed
    /// address is flagged primary.
    pub async fn fetch_profile(
        &self,
        access_token: &ProviderToken,
    ) -> Result<RemoteIdentity, Report<ProviderError>> {
        let identity: RemoteIdentity = self.get_json(&self.config.user_url(), access_token).await?;

        if identity.has_email() {
            return Ok(identity);
        }

        tracing::debug!(provider_id = %identity.id, "profile hides email, listing addresses");
        let emails: Vec<ProviderEmail> =
            self.get_json(&self.config.emails_url(), access_token).await?;

        match select_primary_email(emails) {
            Some(email) => Ok(identity.with_email(email)),
            None => Err(ProviderError::NoPrimaryEmail.into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &ProviderToken,
    ) -> Result<T, Report<ProviderError>> {
        let response = self.transport.get_authenticated(url, access_token).await?;

        if !response.is_success() {
            return Err(ProviderError::ProfileFetch {
                reason: format!("{url} returned status {}", response.status),
            }
            .into());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            ProviderError::ProfileFetch {
                reason: format!("{url} returned an unparseable body: {e}"),
            }
            .into()
        })
    }
}

fn invalid_config(what: &str, err: impl std::fmt::Display) -> Report<ProviderError> {
    ProviderError::Exchange {
        reason: format!("invalid {what}: {err}"),
    }
    .into()
}


#[cfg(test)]
mod tests {
    use super::testing::{ScriptedTransport, test_config};
    use super::*;

    const USER_URL: &str = "https://api.test/user";
    const EMAILS_URL: &str = "https://api.test/user/emails";

    fn client(transport: ScriptedTransport) -> IdentityProviderClient {
        IdentityProviderClient::new(test_config(), Arc::new(transport))
    }

    fn token(value: &str) -> ProviderToken {
        ProviderToken::new(value.to_string())
    }

    #[test]
    fn authorization_url_carries_client_redirect_scope_and_state() {
        let url = client(ScriptedTransport::new())
            .authorization_url("state")
            .unwrap();

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Foauth2%2Fcallback"));
        assert!(url.contains("scope=user%3Aemail"));
        assert!(url.contains("state=state"));
        assert!(!url.contains("test-secret"));
    }

    #[test]
    fn authorization_url_is_deterministic() {
        let client = client(ScriptedTransport::new());
        assert_eq!(
            client.authorization_url("xyz").unwrap(),
            client.authorization_url("xyz").unwrap()
        );
    }

    #[test]
    fn authorization_url_rejects_invalid_redirect() {
        let config = ProviderConfig::new(
            "id".to_string(),
            "secret".to_string(),
            "not a url".to_string(),
        );
        let client = IdentityProviderClient::new(config, Arc::new(ScriptedTransport::new()));

        let err = client.authorization_url("state").unwrap_err();
        assert!(matches!(
            err.current_context(),
            ProviderError::Exchange { .. }
        ));
    }

    #[tokio::test]
    async fn exchange_code_returns_token() {
        let client = client(ScriptedTransport::new().with_code("good", "gho_1"));
        let token = client.exchange_code("good").await.unwrap();
        assert_eq!(token.secret(), "gho_1");
    }

    #[tokio::test]
    async fn exchange_code_rejection_is_exchange_error() {
        let client = client(ScriptedTransport::new());
        let err = client.exchange_code("bad").await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            ProviderError::Exchange { .. }
        ));
    }

    #[tokio::test]
    async fn profile_with_email_skips_emails_call() {
        let transport = Arc::new(ScriptedTransport::new().with_response(
            USER_URL,
            "gho_1",
            200,
            r#"{"id":12345,"login":"alice","email":"a@example.com"}"#,
        ));
        let client = IdentityProviderClient::new(test_config(), transport.clone());

        let identity = client.fetch_profile(&token("gho_1")).await.unwrap();

        assert_eq!(identity.login, "alice");
        assert_eq!(identity.email, "a@example.com");
        assert_eq!(transport.calls(), vec![format!("GET {USER_URL}")]);
    }

    #[tokio::test]
    async fn hidden_email_is_backfilled_from_primary() {
        let client = client(
            ScriptedTransport::new()
                .with_response(
                    USER_URL,
                    "gho_1",
                    200,
                    r#"{"id":7,"login":"bob","email":null}"#,
                )
                .with_response(
                    EMAILS_URL,
                    "gho_1",
                    200,
                    r#"[{"email":"x@y.com","primary":false},{"email":"p@y.com","primary":true}]"#,
                ),
        );

        let identity = client.fetch_profile(&token("gho_1")).await.unwrap();
        assert_eq!(identity.login, "bob");
        assert_eq!(identity.email, "p@y.com");
    }

    #[tokio::test]
    async fn no_primary_email_is_reported() {
        let client = client(
            ScriptedTransport::new()
                .with_response(USER_URL, "gho_1", 200, r#"{"id":7,"login":"bob"}"#)
                .with_response(
                    EMAILS_URL,
                    "gho_1",
                    200,
                    r#"[{"email":"x@y.com","primary":false}]"#,
                ),
        );

        let err = client.fetch_profile(&token("gho_1")).await.unwrap_err();
        assert_eq!(err.current_context(), &ProviderError::NoPrimaryEmail);
    }

    #[tokio::test]
    async fn unauthorized_profile_is_profile_fetch_error() {
        let client = client(ScriptedTransport::new());
        let err = client.fetch_profile(&token("gho_1")).await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            ProviderError::ProfileFetch { .. }
        ));
    }

    #[tokio::test]
    async fn unparseable_profile_is_profile_fetch_error() {
        let client = client(ScriptedTransport::new().with_response(
            USER_URL,
            "gho_1",
            200,
            "<html>oops</html>",
        ));
        let err = client.fetch_profile(&token("gho_1")).await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            ProviderError::ProfileFetch { .. }
        ));
    }

    #[tokio::test]
    async fn failing_emails_call_is_profile_fetch_error() {
        let client = client(
            ScriptedTransport::new()
                .with_response(USER_URL, "gho_1", 200, r#"{"id":7,"login":"bob"}"#)
                .with_response(EMAILS_URL, "gho_1", 500, ""),
        );
        let err = client.fetch_profile(&token("gho_1")).await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            ProviderError::ProfileFetch { .. }
        ));
    }

    #[test]
    fn provider_token_debug_is_redacted() {
        assert!(!format!("{:?}", token("gho_secret")).contains("gho_secret"));
    }
}
