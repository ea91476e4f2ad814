//! create resources table migration.

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
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Resources::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Resources::File).string().not_null())
                    .col(
                        ColumnDef::new(Resources::ResourceType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Resources::Description).text())
                    .col(
                        ColumnDef::new(Resources::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Resources::UploadedBy).big_integer())
                    .col(
                        ColumnDef::new(Resources::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_subject")
                            .from(Resources::Table, Resources::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_uploaded_by")
                            .from(Resources::Table, Resources::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // subject pages filter by subject, type and status
        manager
            .create_index(
                Index::create()
                    .name("idx_resources_subject_type_status")
                    .table(Resources::Table)
                    .col(Resources::SubjectId)
                    .col(Resources::ResourceType)
                    .col(Resources::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_status")
                    .table(Resources::Table)
                    .col(Resources::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_uploaded_by")
                    .table(Resources::Table)
                    .col(Resources::UploadedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Resources {
    Table,
    Id,
    SubjectId,
    Title,
    File,
    ResourceType,
    Description,
    Status,
    UploadedBy,
    UploadedAt,
}
