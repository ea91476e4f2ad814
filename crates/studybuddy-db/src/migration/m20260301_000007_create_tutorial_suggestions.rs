//! create tutorial_suggestions table migration.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_users::Users;
use super::m20260301_000004_create_subjects::Subjects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TutorialSuggestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TutorialSuggestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TutorialSuggestions::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TutorialSuggestions::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TutorialSuggestions::Description).text())
                    .col(ColumnDef::new(TutorialSuggestions::Link).string().not_null())
                    .col(
                        ColumnDef::new(TutorialSuggestions::Kind)
                            .string_len(20)
                            .not_null()
                            .default("video"),
                    )
                    .col(ColumnDef::new(TutorialSuggestions::AddedBy).big_integer())
                    .col(
                        ColumnDef::new(TutorialSuggestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorial_suggestions_subject")
                            .from(TutorialSuggestions::Table, TutorialSuggestions::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorial_suggestions_added_by")
                            .from(TutorialSuggestions::Table, TutorialSuggestions::AddedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tutorial_suggestions_subject")
                    .table(TutorialSuggestions::Table)
                    .col(TutorialSuggestions::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TutorialSuggestions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TutorialSuggestions {
    Table,
    Id,
    SubjectId,
    Title,
    Description,
    Link,
    Kind,
    AddedBy,
    CreatedAt,
}
