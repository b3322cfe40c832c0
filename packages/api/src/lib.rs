//! # API crate: HTTP surface of the to-do service
//!
//! This crate turns an [`AppState`] and a session store into the complete axum
//! [`Router`]. The `web` binary only has to load [`Settings`], build the
//! services and serve the router.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Google OAuth handshake, anti-forgery cookie, session resolver and the [`auth::Owner`] extractor |
//! | [`gate`] | Sign-in middleware redirecting anonymous requests |
//! | [`todos`] | To-do handlers over [`store::ItemStore`] |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`error`] | [`AppError`] and its HTTP mapping |
//!
//! ## Routes
//!
//! | Method | Path | Gated |
//! |--------|------|-------|
//! | `GET` | `/` | yes |
//! | `GET` / `POST` | `/todos` | yes |
//! | `DELETE` | `/todos/{id}` | yes |
//! | `GET` | `/complete-todo/{id}` | yes |
//! | `GET` | `/auth/google/login` | no |
//! | `GET` | `/auth/google/callback` | no |

use axum::middleware;
use axum::routing::{delete, get};
use axum::Router;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub mod auth;
pub mod error;
pub mod gate;
pub mod settings;
pub mod state;
pub mod todos;


pub use error::AppError;
pub use settings::Settings;
pub use state::AppState;

/// Build the application router with sessions kept in `session_store`.
pub fn router<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let sessions = SessionManagerLayer::new(session_store)
        .with_name(auth::SESSION_COOKIE_NAME)
        .with_secure(state.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(30)))
        .with_signed(state.session_key.clone());

    Router::new()
        .route("/", get(todos::index))
        .route("/todos", get(todos::list_items).post(todos::add_item))
        .route("/todos/{id}", delete(todos::remove_item))
        .route("/complete-todo/{id}", get(todos::complete_item))
        .route("/auth/google/login", get(auth::handlers::google_login))
        .route("/auth/google/callback", get(auth::handlers::google_callback))
        .layer(middleware::from_fn(gate::require_session))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
