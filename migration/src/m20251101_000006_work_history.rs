use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000002_work::Work};

static IDX_WORK_HISTORY_TIMESTAMP: &str = "idx-work_history-timestamp";
static FK_WORK_HISTORY_WORK_ID: &str = "fk-work_history-work_id";
static FK_WORK_HISTORY_USER_ID: &str = "fk-work_history-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkHistory::Id))
                    .col(integer(WorkHistory::WorkId))
                    .col(integer(WorkHistory::UserId))
                    .col(string(WorkHistory::ActionType))
                    .col(text_null(WorkHistory::Description))
                    .col(timestamp(WorkHistory::Timestamp))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORK_HISTORY_WORK_ID)
                            .from(WorkHistory::Table, WorkHistory::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORK_HISTORY_USER_ID)
                            .from(WorkHistory::Table, WorkHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORK_HISTORY_TIMESTAMP)
                    .table(WorkHistory::Table)
                    .col(WorkHistory::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORK_HISTORY_TIMESTAMP)
                    .table(WorkHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WorkHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum WorkHistory {
    Table,
    Id,
    WorkId,
    UserId,
    ActionType,
    Description,
    Timestamp,
}
