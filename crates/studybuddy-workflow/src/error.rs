//! error types for studybuddy-workflow.

use thiserror::Error;

/// errors returned by workflow operations.
///
/// every kind maps to a distinct client-facing outcome, so callers match on
/// the variant rather than the message.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// the caller's role does not allow the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// the referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// the input was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// a user tried to change their own role.
    #[error("you cannot change your own role")]
    SelfModification,

    /// a concurrent write won a uniqueness race. retrying is safe.
    #[error("conflict: {0}")]
    Conflict(String),

    /// storage failure.
    #[error(transparent)]
    Database(studybuddy_db::Error),
}

impl From<studybuddy_db::Error> for WorkflowError {
    fn from(err: studybuddy_db::Error) -> Self {
        match err {
            studybuddy_db::Error::AlreadyExists(msg) => WorkflowError::Conflict(msg),
            studybuddy_db::Error::NotFound(msg) => WorkflowError::NotFound(msg),
            other => WorkflowError::Database(other),
        }
    }
}

/// result type for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
