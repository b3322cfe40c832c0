//! OAuth configuration from settings.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::AuthError;
use crate::settings;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Create Google OAuth config from the `[google]` settings section.
    pub fn google(google: &settings::Google) -> Result<Self, AuthError> {
        if google.client_id.is_empty() || google.client_secret.is_empty() {
            tracing::warn!("Google OAuth client id or secret is empty; logins will be rejected");
        }

        Ok(Self {
            client_id: ClientId::new(google.client_id.clone()),
            client_secret: ClientSecret::new(google.client_secret.clone()),
            auth_url: AuthUrl::new(GOOGLE_AUTH_URL.to_string())?,
            token_url: TokenUrl::new(GOOGLE_TOKEN_URL.to_string())?,
            redirect_url: RedirectUrl::new(google.redirect_url.clone())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google(redirect_url: &str) -> settings::Google {
        settings::Google {
            client_id: "client".into(),
            client_secret: "secret".into(),
            redirect_url: redirect_url.into(),
        }
    }

    #[test]
    fn test_google_endpoints() {
        let config = OAuthConfig::google(&google("http://localhost:3000/auth/google/callback"))
            .unwrap();

        assert_eq!(config.auth_url.as_str(), GOOGLE_AUTH_URL);
        assert_eq!(config.token_url.as_str(), GOOGLE_TOKEN_URL);
        assert_eq!(config.client_id.as_str(), "client");
    }

    #[test]
    fn test_invalid_redirect_url() {
        let result = OAuthConfig::google(&google("not a url"));
        assert!(matches!(result, Err(AuthError::Endpoint(_))));
    }
}
