//! # Google OAuth 2.0 implementation
//!
//! Implements the Google Authorization Code flow used by the sign-in handshake.
//!
//! ## Types
//!
//! - [`ConfiguredClient`]: a fully-typed `oauth2::Client` alias with auth and token
//!   endpoints set.
//! - [`GoogleOAuth`]: the [`IdentityProvider`] that wraps an [`OAuthConfig`] and a
//!   shared `reqwest` client.
//!
//! ## Flow
//!
//! 1. **[`authorize_url`](IdentityProvider::authorize_url)**: builds an authorization
//!    URL requesting the `userinfo.email` scope, embedding the caller's anti-forgery
//!    token as `state`. The token itself is kept by the caller in a cookie; nothing
//!    is stored server-side.
//!
//! 2. **[`fetch_profile`](IdentityProvider::fetch_profile)**: called by the
//!    `/auth/google/callback` route. It exchanges the authorization code for an
//!    access token and fetches the raw profile body from the Google userinfo
//!    endpoint. Parsing is left to the caller so that transport failures and
//!    malformed profiles can be answered differently.
//!
//! The HTTP client does not follow redirects and applies the configured request
//! timeout to both the token exchange and the profile fetch.

use std::time::Duration;

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, Scope, TokenResponse};

use super::config::OAuthConfig;
use super::provider::{AuthError, IdentityProvider};

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const USERINFO_EMAIL_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handler.
pub struct GoogleOAuth {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuth {
    /// Create a new Google OAuth handler whose outbound calls time out after `timeout`.
    pub fn new(config: OAuthConfig, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(AuthError::Client)?;

        Ok(Self { config, http })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuth {
    fn authorize_url(&self, state: &CsrfToken) -> Url {
        let state = state.clone();
        let (auth_url, _) = self
            .create_client()
            .authorize_url(move || state)
            .add_scope(Scope::new(USERINFO_EMAIL_SCOPE.to_string()))
            .url();
        auth_url
    }

    async fn fetch_profile(&self, code: &str) -> Result<Vec<u8>, AuthError> {
        let token_result = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        let body = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(token_result.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings;

    fn oauth() -> GoogleOAuth {
        let config = OAuthConfig::google(&settings::Google {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_url: "http://localhost:3000/auth/google/callback".into(),
        })
        .unwrap();
        GoogleOAuth::new(config, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_authorize_url_carries_state() {
        let state = CsrfToken::new("abc123".to_string());
        let url = oauth().authorize_url(&state);

        assert_eq!(url.host_str(), Some("accounts.google.com"));

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        assert_eq!(get("state").as_deref(), Some("abc123"));
        assert_eq!(get("client_id").as_deref(), Some("client-id"));
        assert_eq!(get("response_type").as_deref(), Some("code"));
        assert_eq!(get("scope").as_deref(), Some(USERINFO_EMAIL_SCOPE));
        assert_eq!(
            get("redirect_uri").as_deref(),
            Some("http://localhost:3000/auth/google/callback")
        );
    }
}
