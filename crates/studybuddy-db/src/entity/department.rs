//! department entity for database storage.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use studybuddy_types::{Department, DepartmentId};

/// department database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject::Entity")]
    Subjects,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Department {
    fn from(model: Model) -> Self {
        Department {
            id: DepartmentId(model.id as u64),
            name: model.name,
            description: model.description,
            image: model.image,
        }
    }
}

impl From<&Department> for ActiveModel {
    fn from(dept: &Department) -> Self {
        ActiveModel {
            id: if dept.id.0 == 0 {
                NotSet
            } else {
                Set(dept.id.as_i64())
            },
            name: Set(dept.name.clone()),
            description: Set(dept.description.clone()),
            image: Set(dept.image.clone()),
        }
    }
}
