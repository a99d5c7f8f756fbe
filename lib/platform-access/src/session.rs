//! Session tokens.
//!
//! A session token is the opaque credential carried in the session cookie.
//! It is drawn from the operating system's CSPRNG on every login and bound to
//! exactly one `LocalUser` at a time.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

/// Number of random bytes in a session token (256 bits of entropy).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded session token.
pub const SESSION_TOKEN_LEN: usize = SESSION_TOKEN_BYTES * 2;

/// Opaque, unguessable session credential.
///
/// Rendered as 64 lowercase hexadecimal characters. The `Debug` output is
/// redacted so tokens never leak through logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh token from the system random source.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TokenGeneration` if the random source fails.
    pub fn generate() -> Result<Self, StoreError> {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| StoreError::TokenGeneration {
                details: e.to_string(),
            })?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Wraps a token value read back from storage or a cookie.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true if the value has the shape of a generated token.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == SESSION_TOKEN_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
