//! subject entity for database storage.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use studybuddy_types::{DepartmentId, Subject, SubjectId};

/// subject database model. (department_id, name, semester) is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub semester: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::resource::Entity")]
    Resources,
    #[sea_orm(has_many = "super::tutorial::Entity")]
    Tutorials,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

impl Related<super::tutorial::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutorials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subject {
    fn from(model: Model) -> Self {
        Subject {
            id: SubjectId(model.id as u64),
            department_id: DepartmentId(model.department_id as u64),
            name: model.name,
            semester: model.semester,
        }
    }
}

impl From<&Subject> for ActiveModel {
    fn from(subject: &Subject) -> Self {
        ActiveModel {
            id: if subject.id.0 == 0 {
                NotSet
            } else {
                Set(subject.id.as_i64())
            },
            department_id: Set(subject.department_id.as_i64()),
            name: Set(subject.name.clone()),
            semester: Set(subject.semester),
        }
    }
}
