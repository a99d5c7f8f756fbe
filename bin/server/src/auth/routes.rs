//! Authentication routes for login and the OAuth callback.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use super::{AppState, CallbackError, SESSION_COOKIE};

/// Returns the first `code` parameter, or an empty string when absent.
///
/// Repeated parameters are tolerated so that every malformed callback ends
/// in the same 500 instead of an extractor rejection.
fn first_code(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Serves the unauthenticated entry point with a link to the provider.
pub async fn login(State(state): State<Arc<AppState>>) -> Response {
    match state.orchestrator.login_link() {
        Ok(link) => Html(link).into_response(),
        Err(e) => {
            tracing::error!("Failed to build authorization URL: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Handles the provider's redirect back after the user grants consent.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, CallbackError> {
    tracing::debug!("OAuth callback received");

    let code = first_code(params);
    let token = state.orchestrator.complete_callback(&code).await?;

    let session_cookie = Cookie::build((SESSION_COOKIE, token.into_inner()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(state.session_config.max_age());

    Ok((jar.add(session_cookie), Redirect::to("/")))
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match &self {
            Self::Provider(report) => tracing::error!("Sign-in failed at provider: {}", report),
            Self::Store(report) => tracing::error!("Sign-in failed at store: {}", report),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn first_code_wins_when_repeated() {
        let params = pairs(&[("state", "state"), ("code", "valid"), ("code", "x")]);
        assert_eq!(first_code(params), "valid");
    }

    #[test]
    fn missing_code_is_empty() {
        assert_eq!(first_code(pairs(&[("state", "state")])), "");
        assert_eq!(first_code(Vec::new()), "");
    }
}
