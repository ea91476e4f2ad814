//! error types for studybuddy-types

use thiserror::Error;

/// errors that can occur when parsing studybuddy domain values
#[derive(Debug, Error)]
pub enum Error {
    /// unknown role string
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// unknown resource type string
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// unknown resource status string
    #[error("unknown resource status: {0}")]
    UnknownResourceStatus(String),

    /// unknown tutorial kind string
    #[error("unknown tutorial kind: {0}")]
    UnknownTutorialKind(String),

    /// configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
