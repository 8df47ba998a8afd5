use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub work_id: i32,
    pub equipment_no: String,
    pub pmt_no: Option<String>,
    pub description: Option<String>,
    pub drawing_path: Option<String>,
    pub extracted_by: Option<i32>,
    pub extracted_date: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work::Entity",
        from = "Column::WorkId",
        to = "super::work::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Work,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ExtractedBy",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Extractor,
    #[sea_orm(has_many = "super::component::Entity")]
    Component,
    #[sea_orm(has_many = "super::correction_log::Entity")]
    CorrectionLog,
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Work.def()
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl Related<super::correction_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorrectionLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
