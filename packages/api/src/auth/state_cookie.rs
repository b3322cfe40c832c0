//! Anti-forgery `state` cookie for the OAuth handshake.
//!
//! The token lives only in the browser: it is set on login, echoed back by the
//! provider as `state`, compared on callback and then cleared.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use time::{Duration, OffsetDateTime};
use tower_sessions::cookie::Cookie;

pub const STATE_COOKIE_NAME: &str = "oauthstate";

const STATE_COOKIE_TTL: Duration = Duration::hours(24);

/// Cookie carrying `state`, valid for 24 hours.
pub fn issue(state: &str) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE_NAME, state.to_owned()))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::now_utc() + STATE_COOKIE_TTL)
        .build()
}

/// Cookie that removes the state cookie from the browser.
pub fn clear() -> Cookie<'static> {
    Cookie::build((STATE_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Value of the state cookie sent with the request, if any.
pub fn read(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == STATE_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
