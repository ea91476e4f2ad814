//! uploader approvals and faculty role changes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use studybuddy_types::{ApprovedUploader, User, UserId};

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploaders/{user_id}", post(grant).delete(revoke))
        .route("/faculty/{user_id}", post(promote).delete(demote))
}

/// `POST /api/v1/uploaders/{user_id}`
async fn grant(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApprovedUploader>, ApiError> {
    Ok(Json(
        state
            .workflow
            .grant_uploader(&auth.user, UserId(user_id))
            .await?,
    ))
}

/// `DELETE /api/v1/uploaders/{user_id}`
async fn revoke(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApprovedUploader>, ApiError> {
    Ok(Json(
        state
            .workflow
            .revoke_uploader(&auth.user, UserId(user_id))
            .await?,
    ))
}

/// `POST /api/v1/faculty/{user_id}`
async fn promote(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(
        state.workflow.promote(&auth.user, UserId(user_id)).await?,
    ))
}

/// `DELETE /api/v1/faculty/{user_id}`
async fn demote(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(
        state.workflow.demote(&auth.user, UserId(user_id)).await?,
    ))
}
