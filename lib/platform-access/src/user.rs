//! The durable user record.
//!
//! A `LocalUser` is created on the first successful login for a provider id
//! and overwritten in place on every later login for the same id.

use chrono::{DateTime, Utc};
use cito_core::{ProviderUserId, UserId};
use serde::Serialize;

use crate::session::SessionToken;

/// A user known to this gateway.
///
/// At most one `LocalUser` exists per provider id, and its session token is
/// unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalUser {
    /// Local surrogate key.
    id: UserId,
    /// Provider-scoped id this record is keyed on.
    provider_id: ProviderUserId,
    /// Provider login at the time of the last sign-in.
    username: String,
    /// Email address at the time of the last sign-in.
    email: String,
    /// Provider access token from the last sign-in.
    #[serde(skip_serializing)]
    provider_access_token: String,
    /// The currently valid session credential.
    #[serde(skip_serializing)]
    session_token: SessionToken,
    /// When the record was first created.
    created_at: DateTime<Utc>,
    /// When the record was last overwritten by a sign-in.
    updated_at: DateTime<Utc>,
}

impl LocalUser {
    /// Creates a user with all fields specified.
    ///
    /// Use this when reconstituting a user from storage.
    #[must_use]
    #[expect(clippy::too_many_arguments)]
    pub fn with_all_fields(
        id: UserId,
        provider_id: ProviderUserId,
        username: String,
        email: String,
        provider_access_token: String,
        session_token: SessionToken,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            provider_id,
            username,
            email,
            provider_access_token,
            session_token,
            created_at,
            updated_at,
        }
    }

    /// Returns the local surrogate key.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the provider-scoped id.
    #[must_use]
    pub fn provider_id(&self) -> ProviderUserId {
        self.provider_id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the provider access token.
    #[must_use]
    pub fn provider_access_token(&self) -> &str {
        &self.provider_access_token
    }

    /// Returns the bound session token.
    #[must_use]
    pub fn session_token(&self) -> &SessionToken {
        &self.session_token
    }

    /// Returns when the user was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the user was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites the profile fields and rebinds the session token.
    pub fn apply_sign_in(
        &mut self,
        username: String,
        email: String,
        provider_access_token: String,
        session_token: SessionToken,
    ) {
        self.username = username;
        self.email = email;
        self.provider_access_token = provider_access_token;
        self.session_token = session_token;
        self.updated_at = Utc::now();
    }
}
