//! role-gated workflow for studybuddy.
//!
//! every operation takes the calling [`User`](studybuddy_types::User) and
//! decides from its role (student, faculty, superadmin) and from any uploader
//! approval whether the call may proceed. rules that need no storage live in
//! [`policy`]; the [`Workflow`] service applies them against a database.

pub mod accounts;
pub mod access;
pub mod bookmarks;
pub mod catalog;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod policy;

pub use accounts::Registration;
pub use catalog::{DepartmentDetail, NewTutorial, SubjectDetail};
pub use dashboard::{DashboardStats, UploaderRow, UserRow, UserSort};
pub use engine::{EditedResource, NewResource, ResourceChanges, Workflow};
pub use error::{Result, WorkflowError};
