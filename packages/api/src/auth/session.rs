//! # Session resolver
//!
//! Sessions are managed by `tower-sessions`. The browser holds a signed cookie
//! named [`SESSION_COOKIE_NAME`] carrying the session id; the session record in
//! the configured store holds the owner id under [`SESSION_OWNER_KEY`].
//!
//! - [`resolve_owner`] turns a request's session into an owner id. A missing or
//!   tampered cookie, a store failure and an empty value all resolve to `None`.
//! - [`bind_owner`] rotates the session id and writes the owner id after a
//!   successful login.
//! - [`Owner`] is the axum extractor handlers use; anonymous requests are
//!   redirected to the sign-in page.
//! - [`session_key`] turns the configured secret into a cookie signing key.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::cookie::Key;
use tower_sessions::Session;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Key for storing the owner id in the session.
pub const SESSION_OWNER_KEY: &str = "owner";

/// Where anonymous browsers are sent.
pub const SIGNIN_PAGE: &str = "/signin.html";

/// Owner id of the current session, or `None` for anonymous requests.
pub async fn resolve_owner(session: &Session) -> Option<String> {
    match session.get::<String>(SESSION_OWNER_KEY).await {
        Ok(owner) => owner.filter(|id| !id.is_empty()),
        Err(e) => {
            tracing::warn!("Failed to read session: {}", e);
            None
        }
    }
}

/// Record `owner` as the logged-in identity of this session and persist it.
///
/// The session id is cycled first; the id the browser presented before the
/// login is dropped from the store.
pub async fn bind_owner(session: &Session, owner: &str) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_OWNER_KEY, owner.to_string()).await?;
    session.save().await
}

/// Cookie signing key derived from the configured secret.
///
/// Signing keys need at least 64 bytes; a shorter or empty secret falls back
/// to a random key, so sessions do not survive a restart.
pub fn session_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!(
                len = secret.len(),
                "SESSION_KEY is shorter than 64 bytes; using a random per-process key"
            );
            Key::generate()
        }
    }
}

/// Owner id of an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        resolve_owner(&session)
            .await
            .map(Owner)
            .ok_or_else(|| Redirect::temporary(SIGNIN_PAGE).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_fresh_session_is_anonymous() {
        assert_eq!(resolve_owner(&session()).await, None);
    }

    #[tokio::test]
    async fn test_bind_then_resolve() {
        let session = session();
        bind_owner(&session, "108234").await.unwrap();
        assert_eq!(resolve_owner(&session).await.as_deref(), Some("108234"));
        assert_eq!(
            session.get::<String>("owner").await.unwrap().as_deref(),
            Some("108234")
        );
    }

    #[tokio::test]
    async fn test_bind_changes_session_id() {
        let session = session();
        session.insert("seed", true).await.unwrap();
        session.save().await.unwrap();
        let before = session.id();

        bind_owner(&session, "108234").await.unwrap();

        assert!(before.is_some());
        assert_ne!(session.id(), before);
    }

    #[tokio::test]
    async fn test_empty_owner_is_anonymous() {
        let session = session();
        session.insert(SESSION_OWNER_KEY, String::new()).await.unwrap();
        assert_eq!(resolve_owner(&session).await, None);
    }

    #[test]
    fn test_session_key_accepts_long_secret() {
        let secret = "k".repeat(64);
        let a = session_key(&secret);
        let b = session_key(&secret);
        assert_eq!(a.master(), b.master());
    }

    #[test]
    fn test_session_key_falls_back_for_short_secret() {
        let a = session_key("");
        let b = session_key("short");
        assert_ne!(a.master(), b.master());
    }
}
