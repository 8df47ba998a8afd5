use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static FK_WORK_CREATED_BY: &str = "fk-work-created_by";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(pk_auto(Work::Id))
                    .col(string(Work::WorkName))
                    .col(text_null(Work::Description))
                    .col(string(Work::Status).default("Pending"))
                    .col(string_null(Work::ExcelPath))
                    .col(string_null(Work::PptPath))
                    .col(integer_null(Work::CreatedBy))
                    .col(timestamp(Work::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORK_CREATED_BY)
                            .from(Work::Table, Work::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Work::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Work {
    Table,
    Id,
    WorkName,
    Description,
    Status,
    ExcelPath,
    PptPath,
    CreatedBy,
    CreatedAt,
}
