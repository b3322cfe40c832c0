use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors a request handler can end with. Every variant is answered with a 500.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid google oauth state cookie: {cookie} state:{state}")]
    StateMismatch { cookie: String, state: String },

    #[error("invalid user info: {0}")]
    Profile(#[from] serde_json::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("storage error: {0}")]
    Store(#[from] store::StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
