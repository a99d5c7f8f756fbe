//! Session gate for protected routes.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use cito_platform_access::AuthenticatedUser;
use std::sync::Arc;

use super::{AppState, SESSION_COOKIE};

/// Extractor for requiring an authenticated user.
///
/// Resolves the session cookie against the store on every request. If the
/// cookie is missing or unknown the request is redirected to the login page
/// and the handler never runs.
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::InternalError)?;

        let session_cookie = jar.get(SESSION_COOKIE).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "no session cookie");
            AuthRejection::NotAuthenticated
        })?;

        let user = app_state
            .session_store
            .find_user_by_session_token(session_cookie.value())
            .await
            .map_err(|e| {
                if e.current_context().is_not_found() {
                    tracing::debug!(path = %parts.uri.path(), "unknown session token");
                    AuthRejection::NotAuthenticated
                } else {
                    tracing::warn!("Session lookup failed: {}", e);
                    AuthRejection::InternalError
                }
            })?;

        Ok(RequireAuth(AuthenticatedUser::new(user)))
    }
}

/// Rejection type for the session gate.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
    InternalError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => Redirect::to("/login").into_response(),
            Self::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
