//! # Item Routes
//!
//! The inventory ledger's REST surface. Handlers are thin: extract,
//! validate via atrium-core, call the store, map errors.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use atrium_core::validation::{validate_item_patch, validate_new_item};
use atrium_core::{Item, ItemInput};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list).post(create))
        .route("/api/items/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/items - all items, name ascending.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.get_items().await?;
    Ok(Json(items))
}

/// GET /api/items/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, ApiError> {
    let item = state
        .store
        .get_item(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", id))?;
    Ok(Json(item))
}

/// POST /api/items - 201 with the created row.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let new_item = validate_new_item(&payload)?;
    debug!(name = %new_item.name, "Creating item");

    let item = state.store.create_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id} - merge a partial update onto the row.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemInput>,
) -> Result<Json<Item>, ApiError> {
    let patch = validate_item_patch(&payload)?;
    debug!(id, "Updating item");

    let item = state.store.update_item(id, patch).await?;
    Ok(Json(item))
}

/// DELETE /api/items/{id} - 204 whether or not the row existed.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
