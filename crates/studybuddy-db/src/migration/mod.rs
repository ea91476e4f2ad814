//! database migrations for studybuddy.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_api_keys;
mod m20260301_000003_create_departments;
mod m20260301_000004_create_subjects;
mod m20260301_000005_create_resources;
mod m20260301_000006_create_approved_uploaders;
mod m20260301_000007_create_tutorial_suggestions;
mod m20260301_000008_create_bookmarks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_api_keys::Migration),
            Box::new(m20260301_000003_create_departments::Migration),
            Box::new(m20260301_000004_create_subjects::Migration),
            Box::new(m20260301_000005_create_resources::Migration),
            Box::new(m20260301_000006_create_approved_uploaders::Migration),
            Box::new(m20260301_000007_create_tutorial_suggestions::Migration),
            Box::new(m20260301_000008_create_bookmarks::Migration),
        ]
    }
}
