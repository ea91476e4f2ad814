//! core types for studybuddy - a study resource sharing service.
//!
//! this crate provides the fundamental data structures used throughout studybuddy:
//! - [`user`]: users and their roles (student, faculty, superadmin)
//! - [`catalog`]: departments and subjects
//! - [`resource`]: uploaded study material and its review status
//! - [`uploader`]: upload approvals granted to students
//! - [`tutorial`]: externally linked tutorial suggestions
//! - [`bookmark`]: saved resources
//! - [`config`]: application configuration

mod api_key;
mod api_key_secret;
mod bookmark;
mod catalog;
mod config;
mod email;
mod error;
mod page;
mod resource;
mod tutorial;
mod uploader;
mod user;
mod username;

pub mod test_utils;

pub use api_key::ApiKey;
pub use api_key_secret::{API_KEY_PREFIX, ApiKeySecret, ApiKeySecretError};
pub use bookmark::{Bookmark, BookmarkToggle};
pub use catalog::{Department, DepartmentId, MAX_SEMESTER, Subject, SubjectId};
pub use config::{ChatConfig, Config, DatabaseConfig, MediaConfig, SqliteConfig};
pub use email::{Email, EmailError};
pub use error::Error;
pub use page::{PAGE_SIZE, Page};
pub use resource::{Resource, ResourceId, ResourceStatus, ResourceType};
pub use tutorial::{TutorialId, TutorialKind, TutorialSuggestion};
pub use uploader::ApprovedUploader;
pub use user::{Role, User, UserId};
pub use username::{MAX_USERNAME_LEN, Username, UsernameError};

/// result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;
