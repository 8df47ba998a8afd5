use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000002_work::Work};

static IDX_ASSIGN_WORK_WORK_USER: &str = "idx-assign_work-work_id-user_id";
static FK_ASSIGN_WORK_WORK_ID: &str = "fk-assign_work-work_id";
static FK_ASSIGN_WORK_USER_ID: &str = "fk-assign_work-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AssignWork::Table)
                    .if_not_exists()
                    .col(pk_auto(AssignWork::Id))
                    .col(integer(AssignWork::WorkId))
                    .col(integer(AssignWork::UserId))
                    .col(timestamp(AssignWork::AssignedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ASSIGN_WORK_WORK_ID)
                            .from(AssignWork::Table, AssignWork::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ASSIGN_WORK_USER_ID)
                            .from(AssignWork::Table, AssignWork::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ASSIGN_WORK_WORK_USER)
                    .table(AssignWork::Table)
                    .col(AssignWork::WorkId)
                    .col(AssignWork::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ASSIGN_WORK_WORK_USER)
                    .table(AssignWork::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AssignWork::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AssignWork {
    Table,
    Id,
    WorkId,
    UserId,
    AssignedAt,
}
