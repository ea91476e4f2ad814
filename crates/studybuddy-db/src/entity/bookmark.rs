//! bookmark entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use studybuddy_types::{Bookmark, ResourceId, UserId};

/// bookmark database model. (user_id, resource_id) is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookmarks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub resource_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::resource::Entity",
        from = "Column::ResourceId",
        to = "super::resource::Column::Id"
    )]
    Resource,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bookmark {
    fn from(model: Model) -> Self {
        Bookmark {
            id: model.id as u64,
            user_id: UserId::from(model.user_id),
            resource_id: ResourceId(model.resource_id as u64),
            created_at: model.created_at,
        }
    }
}

impl From<&Bookmark> for ActiveModel {
    fn from(bookmark: &Bookmark) -> Self {
        ActiveModel {
            id: if bookmark.id == 0 {
                NotSet
            } else {
                Set(bookmark.id as i64)
            },
            user_id: Set(bookmark.user_id.as_i64()),
            resource_id: Set(bookmark.resource_id.as_i64()),
            created_at: Set(bookmark.created_at),
        }
    }
}
