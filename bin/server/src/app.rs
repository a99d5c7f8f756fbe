//! Router assembly.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{auth, auth::AppState, pages, ws};

/// Builds the application router.
///
/// `/` is gated by the session extractor; `/login`, `/oauth2/callback` and
/// `/ws` are public.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(auth::login))
        .route("/oauth2/callback", get(auth::callback))
        .route("/ws", get(ws::echo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
