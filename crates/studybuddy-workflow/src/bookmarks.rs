//! bookmarks.

use chrono::Utc;
use tracing::debug;

use studybuddy_db::Database;
use studybuddy_types::{Bookmark, BookmarkToggle, Resource, ResourceId, User};

use crate::engine::Workflow;
use crate::error::{Result, WorkflowError};
use crate::policy;

impl<D: Database> Workflow<D> {
    /// flip the caller's bookmark on a resource.
    ///
    /// two concurrent toggles that both try to create the bookmark race on
    /// the unique index; the loser gets [`WorkflowError::Conflict`].
    pub async fn toggle_bookmark(
        &self,
        caller: &User,
        resource_id: ResourceId,
    ) -> Result<BookmarkToggle> {
        self.get_resource(caller, resource_id).await?;

        if let Some(existing) = self.db().get_bookmark(caller.id, resource_id).await? {
            self.db().delete_bookmark(existing.id).await?;
            debug!(user_id = %caller.id, resource_id = %resource_id, "bookmark removed");
            return Ok(BookmarkToggle::Removed);
        }

        self.db()
            .create_bookmark(&new_bookmark(caller, resource_id))
            .await?;
        debug!(user_id = %caller.id, resource_id = %resource_id, "bookmark added");
        Ok(BookmarkToggle::Added)
    }

    /// bookmark a resource. bookmarking twice is a no-op.
    pub async fn add_bookmark(&self, caller: &User, resource_id: ResourceId) -> Result<Bookmark> {
        self.get_resource(caller, resource_id).await?;

        if let Some(existing) = self.db().get_bookmark(caller.id, resource_id).await? {
            return Ok(existing);
        }

        match self
            .db()
            .create_bookmark(&new_bookmark(caller, resource_id))
            .await
        {
            Ok(created) => Ok(created),
            Err(studybuddy_db::Error::AlreadyExists(_)) => self
                .db()
                .get_bookmark(caller.id, resource_id)
                .await?
                .ok_or_else(|| WorkflowError::Conflict(format!("bookmark on {resource_id}"))),
            Err(e) => Err(e.into()),
        }
    }

    /// remove a bookmark.
    pub async fn remove_bookmark(&self, caller: &User, resource_id: ResourceId) -> Result<()> {
        let existing = self
            .db()
            .get_bookmark(caller.id, resource_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("bookmark on resource {resource_id}")))?;
        self.db().delete_bookmark(existing.id).await?;
        Ok(())
    }

    /// the caller's bookmarked resources, most recent first.
    ///
    /// bookmarks on resources the caller can no longer see are left out.
    pub async fn bookmarks_for(&self, caller: &User) -> Result<Vec<Resource>> {
        let resources = self.db().list_bookmarked_resources(caller.id).await?;
        Ok(resources
            .into_iter()
            .filter(|r| policy::can_view(caller, r.status, r.uploaded_by))
            .collect())
    }

    /// ids of the visible resources the caller bookmarked, ascending.
    pub async fn bookmarked_ids(&self, caller: &User) -> Result<Vec<ResourceId>> {
        let mut ids: Vec<ResourceId> = self
            .bookmarks_for(caller)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

fn new_bookmark(caller: &User, resource_id: ResourceId) -> Bookmark {
    Bookmark {
        id: 0,
        user_id: caller.id,
        resource_id,
        created_at: Utc::now(),
    }
}
