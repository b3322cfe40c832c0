//! The identity-provider seam used by the login handshake.

use async_trait::async_trait;
use oauth2::url::Url;
use oauth2::CsrfToken;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while configuring or talking to the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(#[from] oauth2::url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to exchange authorization code: {0}")]
    Exchange(String),

    #[error("failed to get user info: {0}")]
    UserInfo(#[from] reqwest::Error),
}

/// Profile returned by the provider's userinfo endpoint.
///
/// Only `id` is used (it becomes the session's owner id); the rest is
/// deserialized for logging and then dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderProfile {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default)]
    pub picture: String,
}

impl ProviderProfile {
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }
}

/// A redirect-based OAuth identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL the browser is sent to, carrying `state`.
    fn authorize_url(&self, state: &CsrfToken) -> Url;

    /// Exchange `code` for an access token and return the raw profile body.
    async fn fetch_profile(&self, code: &str) -> Result<Vec<u8>, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_google_profile() {
        let raw = br#"{
            "id": "1234567890",
            "email": "someone@example.com",
            "verified_email": true,
            "picture": "https://example.com/p.png"
        }"#;

        let profile = ProviderProfile::from_slice(raw).unwrap();
        assert_eq!(profile.id, "1234567890");
        assert_eq!(profile.email, "someone@example.com");
        assert!(profile.verified_email);
    }

    #[test]
    fn test_profile_without_id_is_rejected() {
        assert!(ProviderProfile::from_slice(br#"{"email": "x@example.com"}"#).is_err());
        assert!(ProviderProfile::from_slice(b"<html>").is_err());
    }
}
