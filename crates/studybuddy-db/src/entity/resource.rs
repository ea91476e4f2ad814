//! resource entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};
use tracing::warn;

use studybuddy_types::{Resource, ResourceId, ResourceStatus, SubjectId, UserId};

/// resource database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub title: String,
    /// stored file path relative to the media root.
    pub file: String,
    /// one of "note", "pyq", "faculty".
    pub resource_type: String,
    pub description: Option<String>,
    /// one of "pending", "approved", "rejected".
    pub status: String,
    /// null once the uploader is deleted.
    pub uploaded_by: Option<i64>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    Uploader,
    #[sea_orm(has_many = "super::bookmark::Entity")]
    Bookmarks,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::bookmark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookmarks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resource {
    fn from(model: Model) -> Self {
        let resource_type = model.resource_type.parse().unwrap_or_else(|e| {
            warn!(resource_id = model.id, error = %e, "invalid resource_type column");
            Default::default()
        });
        // an unreadable status is treated as pending so it needs review again
        let status = model.status.parse().unwrap_or_else(|e| {
            warn!(resource_id = model.id, error = %e, "invalid status column");
            ResourceStatus::Pending
        });

        Resource {
            id: ResourceId(model.id as u64),
            subject_id: SubjectId(model.subject_id as u64),
            title: model.title,
            file: model.file,
            resource_type,
            description: model.description,
            status,
            uploaded_by: model.uploaded_by.map(UserId::from),
            uploaded_at: model.uploaded_at,
        }
    }
}

impl From<&Resource> for ActiveModel {
    fn from(resource: &Resource) -> Self {
        ActiveModel {
            id: if resource.id.0 == 0 {
                NotSet
            } else {
                Set(resource.id.as_i64())
            },
            subject_id: Set(resource.subject_id.as_i64()),
            title: Set(resource.title.clone()),
            file: Set(resource.file.clone()),
            resource_type: Set(resource.resource_type.as_str().to_string()),
            description: Set(resource.description.clone()),
            status: Set(resource.status.as_str().to_string()),
            uploaded_by: Set(resource.uploaded_by.map(UserId::as_i64)),
            uploaded_at: Set(resource.uploaded_at),
        }
    }
}
