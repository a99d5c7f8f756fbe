//! Session authentication domain for the cito gateway.
//!
//! This crate provides:
//! - Provider identity types (`RemoteIdentity`, `ProviderEmail`)
//! - The durable user record (`LocalUser`) and its session credential (`SessionToken`)
//! - The per-request authentication context (`AuthenticatedUser`)
//! - Identity provider configuration (`ProviderConfig`)
//! - The `SessionStore` capability with an in-memory implementation
//! - The error taxonomy shared by the provider client, the stores and the server
//!
//! # Session Model
//!
//! Every successful login upserts exactly one `LocalUser` per provider id and
//! binds a freshly generated token to it. Issuing a new token overwrites the
//! previous one, which is the only way a session stops resolving.
//!
//! # Example
//!
//! ```
//! use cito_core::ProviderUserId;
//! use cito_platform_access::{InMemorySessionStore, RemoteIdentity, SessionStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = InMemorySessionStore::new();
//! let identity = RemoteIdentity::new(ProviderUserId::new(12345), "alice", "a@example.com");
//!
//! let token = store.upsert_user(&identity, "gho_provider_token").await.unwrap();
//! let user = store.find_user_by_session_token(token.as_str()).await.unwrap();
//!
//! assert_eq!(user.username(), "alice");
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod identity;
pub mod provider;
pub mod session;
pub mod store;
pub mod user;

// Re-export main types at crate root
pub use auth::AuthenticatedUser;
pub use error::{ProviderError, StoreError};
pub use identity::{ProviderEmail, RemoteIdentity, select_primary_email};
pub use provider::{ProviderConfig, ProviderConfigBuilder};
pub use session::SessionToken;
pub use store::{InMemorySessionStore, SessionStore};
pub use user::LocalUser;
