//! bookmark endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use studybuddy_types::{Bookmark, BookmarkToggle, Resource, ResourceId};

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext, JsonBody};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub resource_id: u64,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: BookmarkToggle,
    pub bookmarked: bool,
}

#[derive(Debug, Serialize)]
pub struct BookmarkStatusResponse {
    pub bookmarked_ids: Vec<ResourceId>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list))
        .route("/bookmarks/status", get(status))
        .route("/bookmarks/toggle", post(toggle))
        .route("/bookmarks/{resource_id}", post(add).delete(remove))
}

/// `GET /api/v1/bookmarks`
async fn list(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    Ok(Json(state.workflow.bookmarks_for(&auth.user).await?))
}

/// `GET /api/v1/bookmarks/status`
async fn status(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<BookmarkStatusResponse>, ApiError> {
    let bookmarked_ids = state.workflow.bookmarked_ids(&auth.user).await?;
    Ok(Json(BookmarkStatusResponse { bookmarked_ids }))
}

/// `POST /api/v1/bookmarks/toggle`
async fn toggle(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let status = state
        .workflow
        .toggle_bookmark(&auth.user, ResourceId(req.resource_id))
        .await?;
    Ok(Json(ToggleResponse {
        status,
        bookmarked: status.is_bookmarked(),
    }))
}

/// `POST /api/v1/bookmarks/{resource_id}`
async fn add(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(resource_id): Path<u64>,
) -> Result<Json<Bookmark>, ApiError> {
    let bookmark = state
        .workflow
        .add_bookmark(&auth.user, ResourceId(resource_id))
        .await?;
    Ok(Json(bookmark))
}

/// `DELETE /api/v1/bookmarks/{resource_id}`
async fn remove(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(resource_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .workflow
        .remove_bookmark(&auth.user, ResourceId(resource_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
