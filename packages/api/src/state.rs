use std::sync::Arc;

use store::Items;
use tower_sessions::cookie::Key;

use crate::auth::IdentityProvider;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub items: Items,
    pub provider: Arc<dyn IdentityProvider>,
    pub session_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(items: Items, provider: Arc<dyn IdentityProvider>, session_key: Key) -> Self {
        Self {
            items,
            provider,
            session_key,
            secure_cookies: false,
        }
    }

    /// Mark session cookies `Secure` (deployments behind HTTPS).
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}
