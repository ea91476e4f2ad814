//! api error handling for http handlers

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use studybuddy_workflow::WorkflowError;
use tracing::error;

use crate::files::FileStoreError;

/// api error type for handler responses
#[derive(Debug)]
pub enum ApiError {
    /// bad request (400)
    BadRequest(String),
    /// unauthorized (401)
    Unauthorized(String),
    /// forbidden (403)
    Forbidden(String),
    /// not found (404)
    NotFound(String),
    /// conflict (409)
    Conflict(String),
    /// payload too large (413)
    PayloadTooLarge(String),
    /// internal server error (500)
    Internal(String),
}

impl ApiError {
    /// create internal server error from any error type
    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }

    /// create bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// create not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::Internal(msg) => {
                // details stay in the log
                error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::PermissionDenied(msg) => ApiError::Forbidden(msg),
            WorkflowError::NotFound(msg) => ApiError::NotFound(format!("{msg} not found")),
            WorkflowError::Validation(msg) => ApiError::BadRequest(msg),
            e @ WorkflowError::SelfModification => ApiError::BadRequest(e.to_string()),
            WorkflowError::Conflict(msg) => {
                ApiError::Conflict(format!("{msg} was changed concurrently, retry"))
            }
            WorkflowError::Database(e) => ApiError::internal(e),
        }
    }
}

impl From<FileStoreError> for ApiError {
    fn from(err: FileStoreError) -> Self {
        match err {
            e @ FileStoreError::TooLarge { .. } => ApiError::PayloadTooLarge(e.to_string()),
            e @ FileStoreError::InvalidPath(_) => ApiError::internal(e),
            FileStoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ApiError::not_found("file not found")
            }
            FileStoreError::Io(e) => ApiError::internal(e),
        }
    }
}

/// json body extractor that reports malformed input as a json 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: WorkflowError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_workflow_error_status_codes() {
        assert_eq!(
            status(WorkflowError::PermissionDenied("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(WorkflowError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(WorkflowError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(WorkflowError::SelfModification),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(WorkflowError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(WorkflowError::Database(studybuddy_db::Error::Connection(
                "down".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response = ApiError::internal("disk on fire").into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "internal server error");
    }
}
