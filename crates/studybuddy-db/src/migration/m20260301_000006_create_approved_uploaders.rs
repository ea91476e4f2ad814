//! create approved_uploaders table migration.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApprovedUploaders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApprovedUploaders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApprovedUploaders::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ApprovedUploaders::ApprovedBy).big_integer())
                    .col(
                        ColumnDef::new(ApprovedUploaders::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ApprovedUploaders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_approved_uploaders_student")
                            .from(ApprovedUploaders::Table, ApprovedUploaders::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_approved_uploaders_approved_by")
                            .from(ApprovedUploaders::Table, ApprovedUploaders::ApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // at most one approval record per student
        manager
            .create_index(
                Index::create()
                    .name("idx_approved_uploaders_student")
                    .table(ApprovedUploaders::Table)
                    .col(ApprovedUploaders::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApprovedUploaders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ApprovedUploaders {
    Table,
    Id,
    StudentId,
    ApprovedBy,
    IsActive,
    CreatedAt,
}
