use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_equipment::Equipment;

static IDX_COMPONENT_EQUIPMENT_ID: &str = "idx-component-equipment_id";
static FK_COMPONENT_EQUIPMENT_ID: &str = "fk-component-equipment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Component::Table)
                    .if_not_exists()
                    .col(pk_auto(Component::Id))
                    .col(integer(Component::EquipmentId))
                    .col(string(Component::PartName))
                    .col(string_null(Component::Phase))
                    .col(string_null(Component::Fluid))
                    .col(string_null(Component::MaterialSpec))
                    .col(string_null(Component::MaterialGrade))
                    .col(string_null(Component::Insulation))
                    .col(string_null(Component::DesignTemp))
                    .col(string_null(Component::DesignPressure))
                    .col(string_null(Component::OperatingTemp))
                    .col(string_null(Component::OperatingPressure))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMPONENT_EQUIPMENT_ID)
                            .from(Component::Table, Component::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPONENT_EQUIPMENT_ID)
                    .table(Component::Table)
                    .col(Component::EquipmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPONENT_EQUIPMENT_ID)
                    .table(Component::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Component::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Component {
    Table,
    Id,
    EquipmentId,
    PartName,
    Phase,
    Fluid,
    MaterialSpec,
    MaterialGrade,
    Insulation,
    DesignTemp,
    DesignPressure,
    OperatingTemp,
    OperatingPressure,
}
