//! resource upload, editing, download and review.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde::Deserialize;
use studybuddy_types::{Resource, ResourceId, ResourceStatus, ResourceType, SubjectId};
use studybuddy_workflow::{NewResource, ResourceChanges};
use tracing::debug;

use crate::AppState;
use crate::handlers::{ApiError, ApiKeyContext, JsonBody};

/// metadata changes accepted by `PATCH /api/v1/resources/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct EditResourceRequest {
    #[serde(default)]
    pub subject_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", post(upload))
        .route("/resources/mine", get(my_uploads))
        .route(
            "/resources/{id}",
            get(get_resource).patch(edit).delete(remove),
        )
        .route("/resources/{id}/file", get(download))
        .route("/review", get(pending))
        .route("/review/{id}/approve", post(approve))
        .route("/review/{id}/reject", post(reject))
}

/// fields of a multipart upload.
#[derive(Debug, Default)]
struct UploadForm {
    subject_id: Option<u64>,
    title: Option<String>,
    resource_type: Option<ResourceType>,
    description: Option<String>,
    file: Option<(String, Bytes)>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    form.file = Some((file_name, data));
                }
                "subject_id" => {
                    let text = text_field(field).await?;
                    let id = text
                        .trim()
                        .parse()
                        .map_err(|_| ApiError::bad_request("subject_id must be a number"))?;
                    form.subject_id = Some(id);
                }
                "title" => form.title = Some(text_field(field).await?),
                "resource_type" | "type" => {
                    let text = text_field(field).await?;
                    let parsed = text.trim().parse().map_err(|e: studybuddy_types::Error| {
                        ApiError::bad_request(e.to_string())
                    })?;
                    form.resource_type = Some(parsed);
                }
                "description" => form.description = Some(text_field(field).await?),
                other => debug!(field = other, "ignoring unknown upload field"),
            }
        }

        Ok(form)
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))
}

/// `POST /api/v1/resources` (multipart: subject_id, title, resource_type,
/// description, file)
async fn upload(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let form = UploadForm::read(&mut multipart).await?;

    let subject_id = form
        .subject_id
        .ok_or_else(|| ApiError::bad_request("subject_id is required"))?;
    let (file_name, data) = form
        .file
        .ok_or_else(|| ApiError::bad_request("file is required"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("file is empty"));
    }
    let title = form.title.unwrap_or_else(|| file_name.clone());

    // refuse before anything reaches the media root
    state
        .workflow
        .ensure_can_upload(&auth.user, SubjectId(subject_id))
        .await?;

    let stored = state.files.store(&file_name, &data).await?;

    let result = state
        .workflow
        .upload_resource(
            &auth.user,
            NewResource {
                subject_id: SubjectId(subject_id),
                title,
                file: stored.clone(),
                resource_type: form.resource_type.unwrap_or_default(),
                description: form.description,
            },
        )
        .await;

    match result {
        Ok(resource) => Ok((StatusCode::CREATED, Json(resource))),
        Err(e) => {
            state.files.remove(&stored).await;
            Err(e.into())
        }
    }
}

/// `GET /api/v1/resources/mine`
async fn my_uploads(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    Ok(Json(state.workflow.my_uploads(&auth.user).await?))
}

/// `GET /api/v1/resources/{id}`
async fn get_resource(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(
        state
            .workflow
            .get_resource(&auth.user, ResourceId(id))
            .await?,
    ))
}

/// `PATCH /api/v1/resources/{id}`
async fn edit(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<EditResourceRequest>,
) -> Result<Json<Resource>, ApiError> {
    let edited = state
        .workflow
        .edit_resource(
            &auth.user,
            ResourceId(id),
            ResourceChanges {
                subject_id: req.subject_id.map(SubjectId),
                title: req.title,
                resource_type: req.resource_type,
                description: req.description,
                file: None,
            },
        )
        .await?;

    if let Some(old) = edited.replaced_file {
        state.files.remove(&old).await;
    }
    Ok(Json(edited.resource))
}

/// `DELETE /api/v1/resources/{id}`
async fn remove(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .workflow
        .delete_resource(&auth.user, ResourceId(id))
        .await?;
    state.files.remove(&deleted.file).await;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/resources/{id}/file`
async fn download(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let resource = state
        .workflow
        .get_resource(&auth.user, ResourceId(id))
        .await?;
    let data = state.files.read(&resource.file).await?;

    let disposition = format!("attachment; filename=\"{}\"", download_name(&resource.file));
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// the original (sanitised) name of a stored file, without the random prefix.
fn download_name(stored: &str) -> &str {
    let base = stored.rsplit('/').next().unwrap_or(stored);
    base.split_once('_').map_or(base, |(_, name)| name)
}

/// `GET /api/v1/review`
async fn pending(
    auth: ApiKeyContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    Ok(Json(state.workflow.list_pending(&auth.user).await?))
}

/// `POST /api/v1/review/{id}/approve`
async fn approve(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Resource>, ApiError> {
    review(&state, &auth, id, ResourceStatus::Approved).await
}

/// `POST /api/v1/review/{id}/reject`
async fn reject(
    auth: ApiKeyContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Resource>, ApiError> {
    review(&state, &auth, id, ResourceStatus::Rejected).await
}

async fn review(
    state: &AppState,
    auth: &ApiKeyContext,
    id: u64,
    status: ResourceStatus,
) -> Result<Json<Resource>, ApiError> {
    let resource = state
        .workflow
        .set_resource_status(&auth.user, ResourceId(id), status)
        .await?;
    Ok(Json(resource))
}
