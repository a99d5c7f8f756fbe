//! Per-request authentication context.

use cito_core::{ProviderUserId, UserId};

use crate::user::LocalUser;

/// The user resolved from a request's session cookie.
///
/// Created by the session gate after a successful lookup and handed to
/// protected handlers for the duration of one request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user: LocalUser,
}

impl AuthenticatedUser {
    /// Wraps a resolved user record.
    #[must_use]
    pub fn new(user: LocalUser) -> Self {
        Self { user }
    }

    /// Returns the local user ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id()
    }

    /// Returns the provider-scoped id.
    #[must_use]
    pub fn provider_id(&self) -> ProviderUserId {
        self.user.provider_id()
    }

    /// Returns the username shown to the user.
    #[must_use]
    pub fn username(&self) -> &str {
        self.user.username()
    }

    /// Returns the full user record.
    #[must_use]
    pub fn user(&self) -> &LocalUser {
        &self.user
    }

    /// Consumes the context and returns the user record.
    #[must_use]
    pub fn into_user(self) -> LocalUser {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionToken;
    use chrono::Utc;

    #[test]
    fn authenticated_user_exposes_user_info() {
        let now = Utc::now();
        let user = LocalUser::with_all_fields(
            UserId::new(3),
            ProviderUserId::new(12345),
            "alice".to_string(),
            "a@example.com".to_string(),
            "gho_token".to_string(),
            SessionToken::from("cd".repeat(32).as_str()),
            now,
            now,
        );

        let auth_user = AuthenticatedUser::new(user.clone());

        assert_eq!(auth_user.user_id(), UserId::new(3));
        assert_eq!(auth_user.provider_id(), ProviderUserId::new(12345));
        assert_eq!(auth_user.username(), "alice");
        assert_eq!(auth_user.into_user(), user);
    }
}
