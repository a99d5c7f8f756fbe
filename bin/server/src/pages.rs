//! Server-rendered pages.

use axum::response::Html;

use crate::auth::RequireAuth;

/// Protected landing page greeting the signed-in user.
pub async fn home(RequireAuth(user): RequireAuth) -> Html<String> {
    Html(format!(
        "<h1>Hello, {}!</h1><p>You are logged in.</p>",
        escape_html(user.username())
    ))
}

/// Escapes text for interpolation into HTML content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
