//! Session store capability.
//!
//! The store is the single source of truth for "who is logged in". It owns
//! token issuance so that a token only exists once it is durably bound to a
//! user.

use async_trait::async_trait;
use chrono::Utc;
use cito_core::{ProviderUserId, Result, UserId};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::identity::RemoteIdentity;
use crate::session::SessionToken;
use crate::user::LocalUser;

/// Durable mapping from session token to user record.
///
/// Implementations must make `upsert_user` atomic per provider id: concurrent
/// calls for the same id leave exactly one record with one of the issued
/// tokens bound to it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Inserts or overwrites the user for `identity.id` and binds a freshly
    /// generated session token to it.
    ///
    /// Returns the token that ended up persisted.
    async fn upsert_user(
        &self,
        identity: &RemoteIdentity,
        provider_access_token: &str,
    ) -> Result<SessionToken, StoreError>;

    /// Resolves a session token to its user.
    ///
    /// Fails with `StoreError::NotFound` for empty or unknown tokens.
    async fn find_user_by_session_token(
        &self,
        token: &str,
    ) -> Result<LocalUser, StoreError>;
}

#[derive(Default)]
struct Tables {
    users: HashMap<ProviderUserId, LocalUser>,
    by_token: HashMap<SessionToken, ProviderUserId>,
    next_id: i64,
}

/// Process-local session store.
///
/// Suitable for tests and single-instance development; state is lost on
/// restart. A single mutex guards both indexes, which makes every upsert
/// atomic.
#[derive(Default)]
pub struct InMemorySessionStore {
    tables: Mutex<Tables>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of user records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store's lock is poisoned.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.users.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        let guard = self.tables.lock().map_err(|e| StoreError::Unavailable {
            details: format!("in-memory store lock poisoned: {e}"),
        })?;
        Ok(guard)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn upsert_user(
        &self,
        identity: &RemoteIdentity,
        provider_access_token: &str,
    ) -> Result<SessionToken, StoreError> {
        let token = SessionToken::generate()?;
        let mut tables = self.lock()?;

        let previous = match tables.users.get_mut(&identity.id) {
            Some(user) => {
                let previous = user.session_token().clone();
                user.apply_sign_in(
                    identity.login.clone(),
                    identity.email.clone(),
                    provider_access_token.to_string(),
                    token.clone(),
                );
                Some(previous)
            }
            None => None,
        };

        match previous {
            Some(previous) => {
                tables.by_token.remove(&previous);
            }
            None => {
                tables.next_id += 1;
                let now = Utc::now();
                let user = LocalUser::with_all_fields(
                    UserId::new(tables.next_id),
                    identity.id,
                    identity.login.clone(),
                    identity.email.clone(),
                    provider_access_token.to_string(),
                    token.clone(),
                    now,
                    now,
                );
                tables.users.insert(identity.id, user);
            }
        }
        tables.by_token.insert(token.clone(), identity.id);

        debug!(provider_id = %identity.id, username = %identity.login, "upserted user");
        Ok(token)
    }

    async fn find_user_by_session_token(
        &self,
        token: &str,
    ) -> Result<LocalUser, StoreError> {
        if token.is_empty() {
            return Err(StoreError::NotFound.into());
        }

        let tables = self.lock()?;
        tables
            .by_token
            .get(&SessionToken::from(token))
            .and_then(|provider_id| tables.users.get(provider_id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound.into())
    }
}
