//! permission rules and input checks.
//!
//! everything here is pure: callers load whatever records a rule needs and
//! pass them in, so the rules can be tested without a database.

use studybuddy_types::{ApprovedUploader, MAX_SEMESTER, ResourceStatus, User, UserId};

use crate::error::{Result, WorkflowError};

/// longest accepted resource or tutorial title.
pub const MAX_TITLE_LEN: usize = 255;

/// longest accepted first or last name.
pub const MAX_PERSON_NAME_LEN: usize = 30;

/// longest accepted department or subject name.
pub const MAX_CATALOG_NAME_LEN: usize = 100;

/// whether `user` may upload resources or suggest tutorials.
///
/// staff always may. anyone else needs an active approval record of their own.
pub fn can_upload(user: &User, uploader: Option<&ApprovedUploader>) -> bool {
    user.is_staff() || uploader.is_some_and(|u| u.is_active && u.student_id == user.id)
}

/// the status a fresh upload starts in.
pub fn initial_status(uploader: &User) -> ResourceStatus {
    if uploader.is_staff() {
        ResourceStatus::Approved
    } else {
        ResourceStatus::Pending
    }
}

/// the status after the owner edits a resource. non-staff edits go back to
/// review.
pub fn status_after_edit(editor: &User, current: ResourceStatus) -> ResourceStatus {
    if editor.is_staff() {
        current
    } else {
        ResourceStatus::Pending
    }
}

/// whether `user` may delete something created by `owner`.
pub fn can_remove(user: &User, owner: Option<UserId>) -> bool {
    user.is_staff() || owner == Some(user.id)
}

/// whether `user` may see a resource in `status`.
pub fn can_view(user: &User, status: ResourceStatus, owner: Option<UserId>) -> bool {
    status == ResourceStatus::Approved || can_remove(user, owner)
}

pub(crate) fn require_staff(user: &User, action: &str) -> Result<()> {
    if user.is_staff() {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied(format!(
            "only faculty can {action}"
        )))
    }
}

pub(crate) fn require_superadmin(user: &User, action: &str) -> Result<()> {
    if user.is_superadmin() {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied(format!(
            "only a superadmin can {action}"
        )))
    }
}

/// a review may only move a resource to approved or rejected.
pub fn review_target(status: ResourceStatus) -> Result<ResourceStatus> {
    match status {
        ResourceStatus::Pending => Err(WorkflowError::Validation(
            "a review must approve or reject".to_string(),
        )),
        other => Ok(other),
    }
}

/// trim a title and check its length.
pub fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(WorkflowError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(WorkflowError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

/// trim a department or subject name and check its length.
pub fn validate_catalog_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkflowError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_CATALOG_NAME_LEN {
        return Err(WorkflowError::Validation(format!(
            "name must be at most {MAX_CATALOG_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// trim a first or last name. empty is allowed.
pub fn validate_person_name(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.chars().count() > MAX_PERSON_NAME_LEN {
        return Err(WorkflowError::Validation(format!(
            "{field} must be at most {MAX_PERSON_NAME_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

pub fn validate_semester(semester: i32) -> Result<i32> {
    if (1..=MAX_SEMESTER).contains(&semester) {
        Ok(semester)
    } else {
        Err(WorkflowError::Validation(format!(
            "semester must be between 1 and {MAX_SEMESTER}"
        )))
    }
}

/// a tutorial link must be an absolute http or https url.
pub fn validate_link(link: &str) -> Result<String> {
    let link = link.trim();
    let parsed = url::Url::parse(link)
        .map_err(|e| WorkflowError::Validation(format!("invalid link: {e}")))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(link.to_string()),
        _ => Err(WorkflowError::Validation(
            "link must be an http or https url".to_string(),
        )),
    }
}
