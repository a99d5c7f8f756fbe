//! GitHub transport for the identity provider client.

use async_trait::async_trait;
use cito_platform_access::{ProviderConfig, ProviderError};
use oauth2::{
    AuthorizationCode, ClientId, ClientSecret, RedirectUrl, TokenResponse, TokenUrl,
    basic::BasicClient,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use rootcause::Report;

use super::provider::{ProviderResponse, ProviderToken, ProviderTransport};

/// User-Agent sent on every outbound call; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("cito/", env!("CARGO_PKG_VERSION"));

/// Media type for GitHub's REST API.
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Talks to github.com (or a GitHub Enterprise instance) over HTTPS.
pub struct GithubTransport {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl GithubTransport {
    /// Creates a transport for the endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Exchange` if an endpoint is not a valid URL or
    /// the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, Report<ProviderError>> {
        let token_url = TokenUrl::new(config.token_url().to_string()).map_err(|e| {
            ProviderError::Exchange {
                reason: format!("invalid token URL: {e}"),
            }
        })?;
        let redirect_url = RedirectUrl::new(config.redirect_url().to_string()).map_err(|e| {
            ProviderError::Exchange {
                reason: format!("invalid redirect URL: {e}"),
            }
        })?;

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Exchange {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            http,
            client_id: config.client_id().to_string(),
            client_secret: config.client_secret().to_string(),
            token_url,
            redirect_url,
        })
    }
}

#[async_trait]
impl ProviderTransport for GithubTransport {
    async fn exchange_code(&self, code: &str) -> Result<ProviderToken, Report<ProviderError>> {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| ProviderError::Exchange {
                reason: e.to_string(),
            })?;

        Ok(ProviderToken::new(token.access_token().secret().clone()))
    }

    async fn get_authenticated(
        &self,
        url: &str,
        access_token: &ProviderToken,
    ) -> Result<ProviderResponse, Report<ProviderError>> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .header(AUTHORIZATION, format!("Bearer {}", access_token.secret()))
            .send()
            .await
            .map_err(|e| ProviderError::ProfileFetch {
                reason: format!("{url}: {e}"),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::ProfileFetch {
                reason: format!("{url}: failed to read body: {e}"),
            })?;

        Ok(ProviderResponse { status, body })
    }
}
