use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::auth::{resolve_owner, SIGNIN_PAGE};

/// Paths reachable without a session: the sign-in page and the handshake itself.
fn is_public(path: &str) -> bool {
    path.contains("/signin") || path.contains("/auth")
}

/// Sign-in gate: anonymous requests to anything but public paths are redirected to the sign-in page.
pub async fn require_session(session: Session, request: Request, next: Next) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    match resolve_owner(&session).await {
        Some(_) => next.run(request).await,
        None => {
            tracing::debug!(path = %request.uri().path(), "Redirecting anonymous request to sign-in");
            Redirect::temporary(SIGNIN_PAGE).into_response()
        }
    }
}
