//! Identity types sourced from the OAuth provider.
//!
//! `RemoteIdentity` is the deserialization target of the provider's
//! "current user" endpoint. Providers may hide the email address there, in
//! which case it is backfilled from the "user emails" endpoint, whose
//! records are modelled by `ProviderEmail`.

use cito_core::ProviderUserId;
use serde::{Deserialize, Deserializer, Serialize};

/// A user profile as reported by the identity provider.
///
/// Transient: produced during a callback and consumed by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    /// Provider-scoped user id.
    pub id: ProviderUserId,
    /// Provider login name.
    pub login: String,
    /// Public email address, empty when the provider hides it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

impl RemoteIdentity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(id: ProviderUserId, login: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            email: email.into(),
        }
    }

    /// Returns true if the profile carried an email address.
    ///
    /// Only an empty value counts as hidden; any other string is kept as-is.
    #[must_use]
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    /// Replaces the email address.
    #[must_use]
    pub fn with_email(mut self, email: String) -> Self {
        self.email = email;
        self
    }
}

/// One record of the provider's "user emails" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEmail {
    /// The email address.
    pub email: String,
    /// Whether the provider marks this address as the account's primary one.
    #[serde(default)]
    pub primary: bool,
}

/// Returns the first address flagged primary, if any.
#[must_use]
pub fn select_primary_email(emails: Vec<ProviderEmail>) -> Option<String> {
    emails.into_iter().find(|e| e.primary).map(|e| e.email)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_profile_with_email() {
        let json = r#"{"id":12345,"login":"alice","email":"a@example.com"}"#;
        let identity: RemoteIdentity = serde_json::from_str(json).expect("deserialize");

        assert_eq!(identity.id, ProviderUserId::new(12345));
        assert_eq!(identity.login, "alice");
        assert_eq!(identity.email, "a@example.com");
        assert!(identity.has_email());
    }

    #[test]
    fn null_email_becomes_empty() {
        let json = r#"{"id":1,"login":"bob","email":null}"#;
        let identity: RemoteIdentity = serde_json::from_str(json).expect("deserialize");
        assert_eq!(identity.email, "");
        assert!(!identity.has_email());
    }

    #[test]
    fn missing_email_becomes_empty() {
        let json = r#"{"id":1,"login":"bob","name":"Bob","avatar_url":"https://x"}"#;
        let identity: RemoteIdentity = serde_json::from_str(json).expect("deserialize");
        assert!(!identity.has_email());
    }

    #[test]
    fn whitespace_email_is_kept() {
        let json = r#"{"id":1,"login":"bob","email":" "}"#;
        let identity: RemoteIdentity = serde_json::from_str(json).expect("deserialize");
        assert!(identity.has_email());
        assert_eq!(identity.email, " ");
    }

    #[test]
    fn missing_id_is_rejected() {
        let json = r#"{"login":"bob","email":"b@example.com"}"#;
        assert!(serde_json::from_str::<RemoteIdentity>(json).is_err());
    }

    #[test]
    fn selects_primary_email() {
        let json = r#"[{"email":"x@y.com","primary":false},{"email":"p@y.com","primary":true}]"#;
        let emails: Vec<ProviderEmail> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(select_primary_email(emails), Some("p@y.com".to_string()));
    }

    #[test]
    fn first_primary_wins() {
        let emails = vec![
            ProviderEmail {
                email: "first@y.com".to_string(),
                primary: true,
            },
            ProviderEmail {
                email: "second@y.com".to_string(),
                primary: true,
            },
        ];
        assert_eq!(select_primary_email(emails), Some("first@y.com".to_string()));
    }

    #[test]
    fn no_primary_email_yields_none() {
        let emails = vec![ProviderEmail {
            email: "x@y.com".to_string(),
            primary: false,
        }];
        assert_eq!(select_primary_email(emails), None);
        assert_eq!(select_primary_email(Vec::new()), None);
    }

    #[test]
    fn with_email_replaces_address() {
        let identity = RemoteIdentity::new(ProviderUserId::new(1), "bob", "")
            .with_email("p@y.com".to_string());
        assert_eq!(identity.email, "p@y.com");
    }
}
