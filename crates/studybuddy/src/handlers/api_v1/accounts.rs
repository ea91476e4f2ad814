//! registration, the caller's profile and faculty accounts.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use studybuddy_types::{ApprovedUploader, User};
use studybuddy_workflow::Registration;
use tracing::info;

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext, JsonBody};

/// request body for registration and faculty creation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// response for registration: the new account and its first api token.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    /// shown once; only its hash is stored.
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub can_upload: bool,
    pub uploader: Option<ApprovedUploader>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/faculty", post(create_faculty))
}

/// `POST /api/v1/register`
async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.workflow.register_student(req.into()).await?;
    let (secret, _key) = state
        .workflow
        .issue_api_key(user.id, "registration", state.config.api_key_expiration_days)
        .await?;

    info!(user_id = %user.id, "api token issued at registration");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user,
            token: secret.as_str().to_string(),
        }),
    ))
}

/// `GET /api/v1/me`
async fn me(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, ApiError> {
    let uploader = state.workflow.uploader_status(&auth.user).await?;
    let can_upload = auth.user.is_staff() || uploader.as_ref().is_some_and(|u| u.is_active);
    Ok(Json(MeResponse {
        user: auth.user,
        can_upload,
        uploader,
    }))
}

/// `POST /api/v1/faculty`
async fn create_faculty(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.workflow.create_faculty(&auth.user, req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
