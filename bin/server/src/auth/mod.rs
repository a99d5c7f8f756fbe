//! Authentication module for the cito server.
//!
//! This module provides:
//! - The identity provider client and its GitHub transport
//! - The Postgres-backed session store
//! - The auth orchestrator behind the OAuth callback
//! - The session gate extractor for protected routes
//!
//! # Session Model
//!
//! A session is a random token stored on the user's row and mirrored in the
//! `session_token` cookie. Every login regenerates it, so signing in again
//! elsewhere invalidates the previous browser. Each protected request
//! re-resolves the cookie against the store.

pub mod db;
pub mod github;
pub mod middleware;
pub mod orchestrator;
pub mod provider;
pub mod routes;

use crate::config::SessionConfig;
use cito_platform_access::SessionStore;
use std::sync::Arc;

pub use db::PgSessionStore;
pub use github::GithubTransport;
pub use middleware::{AuthRejection, RequireAuth};
pub use orchestrator::{AuthOrchestrator, CallbackError};
pub use provider::{IdentityProviderClient, ProviderTransport};
pub use routes::{callback, login};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session_token";

/// Shared application state.
pub struct AppState {
    /// Durable session store.
    pub session_store: Arc<dyn SessionStore>,
    /// Callback sequence driver.
    pub orchestrator: AuthOrchestrator,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        provider: IdentityProviderClient,
        session_config: SessionConfig,
    ) -> Self {
        let orchestrator = AuthOrchestrator::new(
            provider,
            session_store.clone(),
            session_config.state_token.clone(),
        );
        Self {
            session_store,
            orchestrator,
            session_config,
        }
    }
}
