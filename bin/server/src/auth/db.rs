//! PostgreSQL-backed session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cito_core::{ProviderUserId, UserId};
use cito_platform_access::{LocalUser, RemoteIdentity, SessionStore, SessionToken, StoreError};
use rootcause::Report;
use sqlx::{FromRow, PgPool};

/// Row type for user queries.
#[derive(FromRow)]
struct UserRow {
    id: i64,
    provider_id: i64,
    username: String,
    email: String,
    access_token: String,
    session_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for LocalUser {
    fn from(row: UserRow) -> Self {
        LocalUser::with_all_fields(
            UserId::new(row.id),
            ProviderUserId::new(row.provider_id),
            row.username,
            row.email,
            row.access_token,
            SessionToken::new(row.session_token),
            row.created_at,
            row.updated_at,
        )
    }
}

/// Session store over the `users` table.
///
/// The upsert is a single `INSERT ... ON CONFLICT` statement, so concurrent
/// logins for the same provider id serialize on the unique index.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Creates a new store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable {
        details: e.to_string(),
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn upsert_user(
        &self,
        identity: &RemoteIdentity,
        provider_access_token: &str,
    ) -> Result<SessionToken, Report<StoreError>> {
        let token = SessionToken::generate()?;

        let persisted: String = sqlx::query_scalar(
            r#"
            INSERT INTO users (provider_id, username, email, access_token, session_token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (provider_id) DO UPDATE
            SET username = EXCLUDED.username,
                email = EXCLUDED.email,
                access_token = EXCLUDED.access_token,
                session_token = EXCLUDED.session_token,
                updated_at = NOW()
            RETURNING session_token
            "#,
        )
        .bind(identity.id.get())
        .bind(&identity.login)
        .bind(&identity.email)
        .bind(provider_access_token)
        .bind(token.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;

        tracing::debug!(provider_id = %identity.id, username = %identity.login, "upserted user");
        Ok(SessionToken::new(persisted))
    }

    async fn find_user_by_session_token(
        &self,
        token: &str,
    ) -> Result<LocalUser, Report<StoreError>> {
        if token.is_empty() {
            return Err(StoreError::NotFound.into());
        }

        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, provider_id, username, email, access_token, session_token,
                   created_at, updated_at
            FROM users
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        row.map(LocalUser::from)
            .ok_or_else(|| StoreError::NotFound.into())
    }
}
