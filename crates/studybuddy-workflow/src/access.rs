//! uploader approvals and role changes.

use tracing::{info, warn};

use studybuddy_db::Database;
use studybuddy_types::{ApprovedUploader, Role, User, UserId};

use crate::engine::Workflow;
use crate::error::{Result, WorkflowError};
use crate::policy;

impl<D: Database> Workflow<D> {
    /// allow a student to upload.
    ///
    /// the student keeps a single approval record for life. granting again
    /// reactivates it and records the new approver.
    pub async fn grant_uploader(
        &self,
        caller: &User,
        student_id: UserId,
    ) -> Result<ApprovedUploader> {
        policy::require_staff(caller, "approve uploaders")?;

        let student = self.require_user(student_id).await?;
        if student.is_staff() {
            // staff can already upload; there is no student by that id
            return Err(WorkflowError::NotFound(format!("student {student_id}")));
        }

        let record = match self.db().get_uploader(student_id).await? {
            Some(existing) => self.reactivate(existing, caller.id).await?,
            None => match self
                .db()
                .create_uploader(&ApprovedUploader::new(student_id, caller.id))
                .await
            {
                Ok(created) => created,
                Err(studybuddy_db::Error::AlreadyExists(_)) => {
                    // a concurrent grant created the row first
                    let existing = self.db().get_uploader(student_id).await?.ok_or_else(|| {
                        WorkflowError::Conflict(format!("approval for student {student_id}"))
                    })?;
                    self.reactivate(existing, caller.id).await?
                }
                Err(e) => return Err(e.into()),
            },
        };

        info!(student_id = %student_id, approved_by = %caller.id, "uploader approved");
        Ok(record)
    }

    async fn reactivate(
        &self,
        mut record: ApprovedUploader,
        approver: UserId,
    ) -> Result<ApprovedUploader> {
        record.is_active = true;
        record.approved_by = Some(approver);
        Ok(self.db().update_uploader(&record).await?)
    }

    /// stop a student from uploading. the record stays, inactive.
    pub async fn revoke_uploader(
        &self,
        caller: &User,
        student_id: UserId,
    ) -> Result<ApprovedUploader> {
        policy::require_staff(caller, "revoke upload access")?;

        let mut record = self
            .db()
            .get_uploader(student_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("approval for student {student_id}")))?;

        record.is_active = false;
        let updated = self.db().update_uploader(&record).await?;
        warn!(student_id = %student_id, revoked_by = %caller.id, "uploader revoked");
        Ok(updated)
    }

    /// the caller's own approval record, if any.
    pub async fn uploader_status(&self, caller: &User) -> Result<Option<ApprovedUploader>> {
        Ok(self.db().get_uploader(caller.id).await?)
    }

    /// make a student faculty. faculty and superadmins are left as they are.
    pub async fn promote(&self, caller: &User, target_id: UserId) -> Result<User> {
        if caller.id == target_id {
            return Err(WorkflowError::SelfModification);
        }
        policy::require_superadmin(caller, "assign the faculty role")?;

        let mut target = self.require_user(target_id).await?;
        if target.role != Role::Student {
            return Ok(target);
        }

        target.role = Role::Faculty;
        let updated = self.db().update_user(&target).await?;
        info!(user_id = %target_id, by = %caller.id, "user promoted to faculty");
        Ok(updated)
    }

    /// make a faculty member a student again.
    ///
    /// superadmins cannot be demoted this way. approval records are left
    /// untouched.
    pub async fn demote(&self, caller: &User, target_id: UserId) -> Result<User> {
        if caller.id == target_id {
            return Err(WorkflowError::SelfModification);
        }
        policy::require_superadmin(caller, "remove the faculty role")?;

        let mut target = self.require_user(target_id).await?;
        match target.role {
            Role::SuperAdmin => Err(WorkflowError::PermissionDenied(
                "a superadmin cannot be demoted".to_string(),
            )),
            Role::Student => Ok(target),
            Role::Faculty => {
                target.role = Role::Student;
                let updated = self.db().update_user(&target).await?;
                warn!(user_id = %target_id, by = %caller.id, "faculty role removed");
                Ok(updated)
            }
        }
    }
}
