//! approved uploader entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use studybuddy_types::{ApprovedUploader, UserId};

/// approved uploader database model. one row per student at most.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "approved_uploaders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    pub approved_by: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ApprovedUploader {
    fn from(model: Model) -> Self {
        ApprovedUploader {
            id: model.id as u64,
            student_id: UserId::from(model.student_id),
            approved_by: model.approved_by.map(UserId::from),
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

impl From<&ApprovedUploader> for ActiveModel {
    fn from(record: &ApprovedUploader) -> Self {
        ActiveModel {
            id: if record.id == 0 {
                NotSet
            } else {
                Set(record.id as i64)
            },
            student_id: Set(record.student_id.as_i64()),
            approved_by: Set(record.approved_by.map(UserId::as_i64)),
            is_active: Set(record.is_active),
            created_at: Set(record.created_at),
        }
    }
}
