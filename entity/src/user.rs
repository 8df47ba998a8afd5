use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub password: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assign_work::Entity")]
    AssignWork,
    #[sea_orm(has_many = "super::work_history::Entity")]
    WorkHistory,
    #[sea_orm(has_many = "super::correction_log::Entity")]
    CorrectionLog,
}

impl Related<super::assign_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignWork.def()
    }
}

impl Related<super::work_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkHistory.def()
    }
}

impl Related<super::correction_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorrectionLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
