//! departments, subjects and tutorial suggestions.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use studybuddy_types::{
    Department, DepartmentId, Resource, ResourceStatus, ResourceType, Subject, SubjectId,
    TutorialId, TutorialKind, TutorialSuggestion,
};
use studybuddy_workflow::{DepartmentDetail, NewTutorial, SubjectDetail};

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext, JsonBody};

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub semester: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateTutorialRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link: String,
    #[serde(default)]
    pub kind: TutorialKind,
}

/// query for listing a subject's resources. type is required.
#[derive(Debug, Deserialize)]
pub struct ResourceFilter {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub status: Option<ResourceStatus>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route("/departments/{id}", get(department_detail))
        .route("/departments/{id}/subjects", post(create_subject))
        .route("/subjects/{id}", get(subject_detail))
        .route("/subjects/{id}/resources", get(list_resources))
        .route("/subjects/{id}/tutorials", post(add_tutorial))
        .route("/tutorials/{id}", delete(delete_tutorial))
}

/// `GET /api/v1/departments`
async fn list_departments(
    _auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<Department>>, ApiError> {
    Ok(Json(state.workflow.list_departments().await?))
}

/// `POST /api/v1/departments`
async fn create_department(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let dept = state
        .workflow
        .create_department(&auth.user, &req.name, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(dept)))
}

/// `GET /api/v1/departments/{id}`
async fn department_detail(
    _auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DepartmentDetail>, ApiError> {
    Ok(Json(state.workflow.department_detail(DepartmentId(id)).await?))
}

/// `POST /api/v1/departments/{id}/subjects`
async fn create_subject(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let subject = state
        .workflow
        .create_subject(&auth.user, DepartmentId(id), &req.name, req.semester)
        .await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// `GET /api/v1/subjects/{id}`
async fn subject_detail(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SubjectDetail>, ApiError> {
    Ok(Json(
        state
            .workflow
            .subject_detail(&auth.user, SubjectId(id))
            .await?,
    ))
}

/// `GET /api/v1/subjects/{id}/resources?type=note&status=approved`
async fn list_resources(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(filter): Query<ResourceFilter>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = state
        .workflow
        .list_by_subject_and_type(&auth.user, SubjectId(id), filter.resource_type, filter.status)
        .await?;
    Ok(Json(resources))
}

/// `POST /api/v1/subjects/{id}/tutorials`
async fn add_tutorial(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<CreateTutorialRequest>,
) -> Result<(StatusCode, Json<TutorialSuggestion>), ApiError> {
    let tutorial = state
        .workflow
        .add_tutorial(
            &auth.user,
            NewTutorial {
                subject_id: SubjectId(id),
                title: req.title,
                description: req.description,
                link: req.link,
                kind: req.kind,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tutorial)))
}

/// `DELETE /api/v1/tutorials/{id}`
async fn delete_tutorial(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .workflow
        .delete_tutorial(&auth.user, TutorialId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
