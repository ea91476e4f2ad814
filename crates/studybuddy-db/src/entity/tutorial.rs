//! tutorial suggestion entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};
use tracing::warn;

use studybuddy_types::{SubjectId, TutorialId, TutorialSuggestion, UserId};

/// tutorial suggestion database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tutorial_suggestions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    /// one of "video", "playlist", "article", "pdf", "website".
    pub kind: String,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TutorialSuggestion {
    fn from(model: Model) -> Self {
        let kind = model.kind.parse().unwrap_or_else(|e| {
            warn!(tutorial_id = model.id, error = %e, "invalid tutorial kind column");
            Default::default()
        });

        TutorialSuggestion {
            id: TutorialId(model.id as u64),
            subject_id: SubjectId(model.subject_id as u64),
            title: model.title,
            description: model.description,
            link: model.link,
            kind,
            added_by: model.added_by.map(UserId::from),
            created_at: model.created_at,
        }
    }
}

impl From<&TutorialSuggestion> for ActiveModel {
    fn from(tutorial: &TutorialSuggestion) -> Self {
        ActiveModel {
            id: if tutorial.id.0 == 0 {
                NotSet
            } else {
                Set(tutorial.id.as_i64())
            },
            subject_id: Set(tutorial.subject_id.as_i64()),
            title: Set(tutorial.title.clone()),
            description: Set(tutorial.description.clone()),
            link: Set(tutorial.link.clone()),
            kind: Set(tutorial.kind.as_str().to_string()),
            added_by: Set(tutorial.added_by.map(UserId::as_i64)),
            created_at: Set(tutorial.created_at),
        }
    }
}
