//! upload approvals for students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// a student's permission to upload resources for review.
///
/// there is at most one record per student. revoking flips `is_active`
/// rather than deleting the row, so the history of who approved the
/// student survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedUploader {
    /// unique identifier.
    pub id: u64,
    /// the student allowed to upload.
    pub student_id: UserId,
    /// staff member who last granted the approval.
    pub approved_by: Option<UserId>,
    /// whether the approval currently applies.
    pub is_active: bool,
    /// when the record was first created.
    pub created_at: DateTime<Utc>,
}

impl ApprovedUploader {
    /// a new active approval.
    pub fn new(student_id: UserId, approved_by: UserId) -> Self {
        Self {
            id: 0,
            student_id,
            approved_by: Some(approved_by),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
