//! the workflow service and the resource lifecycle.
//!
//! uploads start approved for staff and pending for everyone else; faculty
//! move pending resources to approved or rejected.

use chrono::Utc;
use tracing::{debug, info, warn};

use studybuddy_db::Database;
use studybuddy_types::{
    Resource, ResourceId, ResourceStatus, ResourceType, Subject, SubjectId, User, UserId,
};

use crate::error::{Result, WorkflowError};
use crate::policy;

/// role-gated operations over a [`Database`].
///
/// cheap to clone when the database handle is.
#[derive(Clone)]
pub struct Workflow<D> {
    db: D,
}

/// what the caller supplies when uploading.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub subject_id: SubjectId,
    pub title: String,
    /// path of the already-stored file, relative to the media root.
    pub file: String,
    pub resource_type: ResourceType,
    pub description: Option<String>,
}

/// fields an owner may change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ResourceChanges {
    pub subject_id: Option<SubjectId>,
    pub title: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub description: Option<String>,
    /// replacement file, already stored.
    pub file: Option<String>,
}

/// result of an edit.
#[derive(Debug, Clone)]
pub struct EditedResource {
    pub resource: Resource,
    /// the file that was replaced, if any. the caller owns its removal.
    pub replaced_file: Option<String>,
}

impl<D: Database> Workflow<D> {
    /// create a workflow over `db`.
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// the underlying database.
    pub fn db(&self) -> &D {
        &self.db
    }

    pub(crate) async fn require_user(&self, id: UserId) -> Result<User> {
        self.db
            .get_user(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("user {id}")))
    }

    pub(crate) async fn require_subject(&self, id: SubjectId) -> Result<Subject> {
        self.db
            .get_subject(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("subject {id}")))
    }

    pub(crate) async fn require_resource(&self, id: ResourceId) -> Result<Resource> {
        self.db
            .get_resource(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("resource {id}")))
    }

    /// whether `user` may upload, looking up their approval if needed.
    pub(crate) async fn may_upload(&self, user: &User) -> Result<bool> {
        if user.is_staff() {
            return Ok(true);
        }
        let record = self.db.get_uploader(user.id).await?;
        Ok(policy::can_upload(user, record.as_ref()))
    }

    /// check that `caller` may upload into `subject_id`.
    ///
    /// run before any file is accepted, so a refused upload never touches
    /// storage.
    pub async fn ensure_can_upload(&self, caller: &User, subject_id: SubjectId) -> Result<()> {
        if !self.may_upload(caller).await? {
            warn!(user_id = %caller.id, "upload refused, user is not an approved uploader");
            return Err(WorkflowError::PermissionDenied(
                "you are not approved to upload".to_string(),
            ));
        }
        self.require_subject(subject_id).await?;
        Ok(())
    }

    /// upload a resource.
    ///
    /// staff uploads are approved immediately. other users need an active
    /// uploader approval and their uploads wait for review.
    pub async fn upload_resource(&self, caller: &User, new: NewResource) -> Result<Resource> {
        self.ensure_can_upload(caller, new.subject_id).await?;
        let title = policy::validate_title(&new.title)?;

        let resource = Resource {
            id: ResourceId(0),
            subject_id: new.subject_id,
            title,
            file: new.file,
            resource_type: new.resource_type,
            description: new.description.filter(|d| !d.trim().is_empty()),
            status: policy::initial_status(caller),
            uploaded_by: Some(caller.id),
            uploaded_at: Utc::now(),
        };

        let created = self.db.create_resource(&resource).await?;
        info!(
            resource_id = %created.id,
            user_id = %caller.id,
            status = %created.status,
            "resource uploaded"
        );
        Ok(created)
    }

    /// approve or reject a resource.
    ///
    /// any current status may be overwritten, so a rejected resource can
    /// later be approved and the other way round.
    pub async fn set_resource_status(
        &self,
        caller: &User,
        id: ResourceId,
        status: ResourceStatus,
    ) -> Result<Resource> {
        policy::require_staff(caller, "review uploads")?;
        let status = policy::review_target(status)?;

        let mut resource = self.require_resource(id).await?;
        let previous = resource.status;
        resource.status = status;
        let updated = self.db.update_resource(&resource).await?;

        info!(
            resource_id = %id,
            reviewer = %caller.id,
            from = %previous,
            to = %status,
            "resource reviewed"
        );
        Ok(updated)
    }

    /// edit a resource the caller uploaded.
    pub async fn edit_resource(
        &self,
        caller: &User,
        id: ResourceId,
        changes: ResourceChanges,
    ) -> Result<EditedResource> {
        let mut resource = self.require_resource(id).await?;
        if !resource.is_owned_by(caller.id) {
            warn!(resource_id = %id, user_id = %caller.id, "edit refused, not the owner");
            return Err(WorkflowError::PermissionDenied(
                "only the uploader can edit this resource".to_string(),
            ));
        }

        if let Some(subject_id) = changes.subject_id {
            self.require_subject(subject_id).await?;
            resource.subject_id = subject_id;
        }
        if let Some(title) = changes.title {
            resource.title = policy::validate_title(&title)?;
        }
        if let Some(resource_type) = changes.resource_type {
            resource.resource_type = resource_type;
        }
        if let Some(description) = changes.description {
            resource.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        let replaced_file = changes
            .file
            .map(|file| std::mem::replace(&mut resource.file, file));

        resource.status = policy::status_after_edit(caller, resource.status);
        let updated = self.db.update_resource(&resource).await?;

        info!(resource_id = %id, user_id = %caller.id, status = %updated.status, "resource edited");
        Ok(EditedResource {
            resource: updated,
            replaced_file,
        })
    }

    /// delete a resource. the uploader and staff may do this.
    ///
    /// returns the deleted resource so the caller can remove its file.
    pub async fn delete_resource(&self, caller: &User, id: ResourceId) -> Result<Resource> {
        let resource = self.require_resource(id).await?;
        if !policy::can_remove(caller, resource.uploaded_by) {
            warn!(resource_id = %id, user_id = %caller.id, "delete refused");
            return Err(WorkflowError::PermissionDenied(
                "only the uploader or faculty can delete this resource".to_string(),
            ));
        }

        self.db.delete_resource(id).await?;
        warn!(resource_id = %id, user_id = %caller.id, "resource deleted");
        Ok(resource)
    }

    /// fetch one resource the caller is allowed to see.
    pub async fn get_resource(&self, caller: &User, id: ResourceId) -> Result<Resource> {
        let resource = self.require_resource(id).await?;
        if !policy::can_view(caller, resource.status, resource.uploaded_by) {
            // unapproved resources are invisible to other users
            debug!(resource_id = %id, user_id = %caller.id, "hidden resource requested");
            return Err(WorkflowError::NotFound(format!("resource {id}")));
        }
        Ok(resource)
    }
}
