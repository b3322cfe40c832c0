//! # To-do routes
//!
//! Thin handlers over [`store::ItemStore`]. Listing and creation are scoped to the
//! caller's [`Owner`]; deletion and completion address items by id only.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use store::{Item, ItemStore};

use crate::auth::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Page the index route redirects to.
pub const TODO_PAGE: &str = "/todo.html";

/// Body of `DELETE /todos/{id}` and `GET /complete-todo/{id}` responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteParams {
    pub complete: Option<String>,
}

pub async fn index() -> Redirect {
    Redirect::temporary(TODO_PAGE)
}

pub async fn list_items(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(state.items.list(&owner).await?))
}

/// `name` comes from an urlencoded body and falls back to the query string.
pub async fn add_item(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Query(query): Query<NewItem>,
    form: Result<Form<NewItem>, FormRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let name = match form {
        Ok(Form(body)) if !body.name.is_empty() => body.name,
        _ => query.name,
    };
    let item = state.items.add(&name, &owner).await?;
    tracing::debug!(id = item.id, owner = %owner, "Added item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Success>, AppError> {
    let success = state.items.remove(id).await?;
    Ok(Json(Success { success }))
}

pub async fn complete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<CompleteParams>,
) -> Result<Json<Success>, AppError> {
    let completed = params.complete.as_deref() == Some("true");
    let success = state.items.complete(id, completed).await?;
    Ok(Json(Success { success }))
}
