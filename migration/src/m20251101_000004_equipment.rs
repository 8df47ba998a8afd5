use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000002_work::Work};

static IDX_EQUIPMENT_WORK_EQUIPMENT_NO: &str = "idx-equipment-work_id-equipment_no";
static FK_EQUIPMENT_WORK_ID: &str = "fk-equipment-work_id";
static FK_EQUIPMENT_EXTRACTED_BY: &str = "fk-equipment-extracted_by";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(pk_auto(Equipment::Id))
                    .col(integer(Equipment::WorkId))
                    .col(string(Equipment::EquipmentNo))
                    .col(string_null(Equipment::PmtNo))
                    .col(text_null(Equipment::Description))
                    .col(string_null(Equipment::DrawingPath))
                    .col(integer_null(Equipment::ExtractedBy))
                    .col(timestamp_null(Equipment::ExtractedDate))
                    .col(timestamp(Equipment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EQUIPMENT_WORK_ID)
                            .from(Equipment::Table, Equipment::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EQUIPMENT_EXTRACTED_BY)
                            .from(Equipment::Table, Equipment::ExtractedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EQUIPMENT_WORK_EQUIPMENT_NO)
                    .table(Equipment::Table)
                    .col(Equipment::WorkId)
                    .col(Equipment::EquipmentNo)
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
                    .name(IDX_EQUIPMENT_WORK_EQUIPMENT_NO)
                    .table(Equipment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Equipment {
    Table,
    Id,
    WorkId,
    EquipmentNo,
    PmtNo,
    Description,
    DrawingPath,
    ExtractedBy,
    ExtractedDate,
    CreatedAt,
}
