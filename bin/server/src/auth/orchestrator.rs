//! Auth orchestrator.
//!
//! Drives one OAuth callback from authorization code to session token:
//! exchange the code, fetch the profile, upsert the user. Every step is
//! terminal on failure; the caller only mints a cookie for the returned
//! token.

use cito_platform_access::{ProviderError, SessionStore, SessionToken, StoreError};
use rootcause::Report;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::provider::IdentityProviderClient;
use crate::pages::escape_html;

/// Failure of a callback sequence.
#[derive(Debug)]
pub enum CallbackError {
    /// The identity provider rejected or failed a call.
    Provider(Report<ProviderError>),
    /// The session store could not persist the user.
    Store(Report<StoreError>),
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(report) => write!(f, "provider step failed: {report}"),
            Self::Store(report) => write!(f, "store step failed: {report}"),
        }
    }
}

impl From<Report<ProviderError>> for CallbackError {
    fn from(report: Report<ProviderError>) -> Self {
        Self::Provider(report)
    }
}

impl From<Report<StoreError>> for CallbackError {
    fn from(report: Report<StoreError>) -> Self {
        Self::Store(report)
    }
}

/// Composes the provider client and the session store.
#[derive(Clone)]
pub struct AuthOrchestrator {
    provider: IdentityProviderClient,
    store: Arc<dyn SessionStore>,
    state_token: String,
}

impl AuthOrchestrator {
    /// Creates an orchestrator that sends `state_token` with every
    /// authorization request.
    pub fn new(
        provider: IdentityProviderClient,
        store: Arc<dyn SessionStore>,
        state_token: String,
    ) -> Self {
        Self {
            provider,
            store,
            state_token,
        }
    }

    /// Returns the identity provider client.
    pub fn provider(&self) -> &IdentityProviderClient {
        &self.provider
    }

    /// Renders the "Sign in with GitHub" anchor for the login page.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Exchange` if the provider endpoints are misconfigured.
    pub fn login_link(&self) -> Result<String, Report<ProviderError>> {
        let url = self.provider.authorization_url(&self.state_token)?;
        Ok(format!(
            r#"<a href="{}">Sign in with GitHub</a>"#,
            escape_html(&url)
        ))
    }

    /// Runs the callback sequence for `code` and returns the issued session token.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. Nothing is persisted unless
    /// the profile fetch succeeded.
    pub async fn complete_callback(&self, code: &str) -> Result<SessionToken, CallbackError> {
        if code.is_empty() {
            warn!("callback received without an authorization code");
            return Err(CallbackError::Provider(
                ProviderError::Exchange {
                    reason: "missing authorization code".to_string(),
                }
                .into(),
            ));
        }

        let access_token = self.provider.exchange_code(code).await?;
        let identity = self.provider.fetch_profile(&access_token).await?;
        let token = self
            .store
            .upsert_user(&identity, access_token.secret())
            .await?;

        info!(provider_id = %identity.id, username = %identity.login, "user signed in");
        Ok(token)
    }
}
