//! staff dashboard endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use studybuddy_types::{Page, User};
use studybuddy_workflow::{DashboardStats, UploaderRow, UserRow, UserSort};

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext};

/// search parameters: `?q=&sort=&page=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

impl SearchParams {
    fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/users", get(users))
        .route("/candidates", get(candidates))
        .route("/uploaders", get(uploaders))
        .route("/faculty", get(faculty))
}

/// `GET /api/v1/dashboard/stats`
async fn stats(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.workflow.dashboard_stats(&auth.user).await?))
}

/// `GET /api/v1/dashboard/users?q=&sort=name_asc&page=1`
async fn users(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page<UserRow>>, ApiError> {
    let sort = UserSort::parse(params.sort.as_deref());
    let page = state
        .workflow
        .search_users(&auth.user, &params.q, sort, params.page())
        .await?;
    Ok(Json(page))
}

/// `GET /api/v1/dashboard/candidates?q=&page=1`
async fn candidates(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page<User>>, ApiError> {
    let page = state
        .workflow
        .promotion_candidates(&auth.user, &params.q, params.page())
        .await?;
    Ok(Json(page))
}

/// `GET /api/v1/dashboard/uploaders`
async fn uploaders(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<UploaderRow>>, ApiError> {
    Ok(Json(state.workflow.approved_uploaders(&auth.user).await?))
}

/// `GET /api/v1/dashboard/faculty`
async fn faculty(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.workflow.faculty_list(&auth.user).await?))
}
