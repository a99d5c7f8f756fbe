//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ProviderError`: failures talking to the OAuth identity provider
//! - `StoreError`: failures resolving or persisting sessions

use std::fmt;

/// Errors from the identity provider client.
///
/// All of these are terminal for the login attempt that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The authorization code could not be exchanged for an access token.
    Exchange { reason: String },
    /// The profile or emails call failed or returned an unparseable body.
    ProfileFetch { reason: String },
    /// The emails call succeeded but no address was flagged primary.
    NoPrimaryEmail,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exchange { reason } => {
                write!(f, "authorization code exchange failed: {reason}")
            }
            Self::ProfileFetch { reason } => {
                write!(f, "provider profile fetch failed: {reason}")
            }
            Self::NoPrimaryEmail => {
                write!(f, "provider returned no primary email address")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user is bound to the given session token (includes the empty token).
    NotFound,
    /// A session token could not be drawn from the system random source.
    TokenGeneration { details: String },
    /// The persistence layer is unreachable or rejected the operation.
    Unavailable { details: String },
}

impl StoreError {
    /// Returns true if this error means "no such session" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "session not found"),
            Self::TokenGeneration { details } => {
                write!(f, "failed to generate session token: {details}")
            }
            Self::Unavailable { details } => {
                write!(f, "session store unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
