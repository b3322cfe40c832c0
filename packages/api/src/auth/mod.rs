//! Authentication: Google OAuth handshake, anti-forgery cookie and session resolution.

mod config;
mod google;
pub mod handlers;
mod provider;
pub mod session;
pub mod state_cookie;

pub use config::OAuthConfig;
pub use google::GoogleOAuth;
pub use provider::{AuthError, IdentityProvider, ProviderProfile};
pub use session::{bind_owner, resolve_owner, session_key, Owner, SESSION_COOKIE_NAME, SESSION_OWNER_KEY, SIGNIN_PAGE};
