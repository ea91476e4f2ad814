//! saved resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ResourceId, UserId};

/// a user's saved reference to a resource. (user, resource) is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    pub user_id: UserId,
    pub resource_id: ResourceId,
    pub created_at: DateTime<Utc>,
}

/// outcome of toggling a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkToggle {
    /// the bookmark did not exist and was created.
    Added,
    /// the bookmark existed and was deleted.
    Removed,
}

impl BookmarkToggle {
    /// whether the resource is bookmarked after the toggle.
    pub fn is_bookmarked(self) -> bool {
        matches!(self, BookmarkToggle::Added)
    }
}
