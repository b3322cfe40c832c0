//! # Sign-in handshake routes
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /auth/google/login` | [`google_login`] |
//! | `GET /auth/google/callback` | [`google_callback`] |
//!
//! Failure handling in the callback:
//!
//! - `state` does not match the `oauthstate` cookie → 500, nothing else happens.
//! - code exchange or profile fetch fails → logged, `307 /`, no session.
//! - profile body does not parse → 500.
//! - session write fails → 500.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use oauth2::CsrfToken;
use serde::Deserialize;
use tower_sessions::Session;

use super::provider::ProviderProfile;
use super::session::bind_owner;
use super::state_cookie;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub state: String,
}

/// Send the browser to Google with a fresh anti-forgery token.
pub async fn google_login(State(state): State<AppState>) -> Response {
    let token = CsrfToken::new_random();
    let auth_url = state.provider.authorize_url(&token);
    let cookie = state_cookie::issue(token.secret());

    (
        [(SET_COOKIE, cookie.to_string())],
        Redirect::temporary(auth_url.as_str()),
    )
        .into_response()
}

/// Finish the handshake: verify `state`, fetch the profile and bind the session.
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    let expected = state_cookie::read(&headers).unwrap_or_default();
    if expected.is_empty() || expected != params.state {
        tracing::warn!(cookie = %expected, state = %params.state, "OAuth state mismatch");
        return Err(AppError::StateMismatch {
            cookie: expected,
            state: params.state,
        });
    }

    let raw = match state.provider.fetch_profile(&params.code).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Google OAuth error: {}", e);
            return Ok(Redirect::temporary("/").into_response());
        }
    };

    let profile = ProviderProfile::from_slice(&raw)?;
    tracing::info!(
        provider_id = %profile.id,
        verified_email = profile.verified_email,
        "Google sign-in"
    );

    bind_owner(&session, &profile.id).await?;

    Ok((
        [(SET_COOKIE, state_cookie::clear().to_string())],
        Redirect::temporary("/"),
    )
        .into_response())
}
