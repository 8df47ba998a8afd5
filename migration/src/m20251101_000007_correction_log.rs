use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000004_equipment::Equipment};

static FK_CORRECTION_LOG_EQUIPMENT_ID: &str = "fk-correction_log-equipment_id";
static FK_CORRECTION_LOG_USER_ID: &str = "fk-correction_log-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorrectionLog::Table)
                    .if_not_exists()
                    .col(pk_auto(CorrectionLog::Id))
                    .col(integer(CorrectionLog::EquipmentId))
                    .col(integer(CorrectionLog::UserId))
                    .col(integer(CorrectionLog::FieldsCorrected))
                    .col(integer(CorrectionLog::TotalFields))
                    .col(timestamp(CorrectionLog::Timestamp))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CORRECTION_LOG_EQUIPMENT_ID)
                            .from(CorrectionLog::Table, CorrectionLog::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CORRECTION_LOG_USER_ID)
                            .from(CorrectionLog::Table, CorrectionLog::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CorrectionLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CorrectionLog {
    Table,
    Id,
    EquipmentId,
    UserId,
    FieldsCorrected,
    TotalFields,
    Timestamp,
}
