use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::within_range;

pub struct CorrectionLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorrectionLogRepository<'a, C> {
    /// Creates a new instance of [`CorrectionLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        equipment_id: i32,
        user_id: i32,
        fields_corrected: i32,
        total_fields: i32,
    ) -> Result<entity::correction_log::Model, DbErr> {
        let entry = entity::correction_log::ActiveModel {
            equipment_id: ActiveValue::Set(equipment_id),
            user_id: ActiveValue::Set(user_id),
            fields_corrected: ActiveValue::Set(fields_corrected),
            total_fields: ActiveValue::Set(total_fields),
            timestamp: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entry.insert(self.db).await
    }

    /// Returns a user's corrections in the optional time range, oldest first
    pub async fn get_by_user(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::correction_log::Model>, DbErr> {
        let query = entity::prelude::CorrectionLog::find()
            .filter(entity::correction_log::Column::UserId.eq(user_id));

        within_range(query, entity::correction_log::Column::Timestamp, start, end)
            .order_by_asc(entity::correction_log::Column::Timestamp)
            .all(self.db)
            .await
    }

    pub async fn get_by_users(
        &self,
        user_ids: &[i32],
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::correction_log::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = entity::prelude::CorrectionLog::find()
            .filter(entity::correction_log::Column::UserId.is_in(user_ids.iter().copied()));

        within_range(query, entity::correction_log::Column::Timestamp, start, end)
            .order_by_asc(entity::correction_log::Column::Timestamp)
            .all(self.db)
            .await
    }

    /// Counts corrections, optionally only those made on the listed equipment
    pub async fn count(&self, equipment_ids: Option<&[i32]>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::CorrectionLog::find();

        if let Some(equipment_ids) = equipment_ids {
            if equipment_ids.is_empty() {
                return Ok(0);
            }
            query = query.filter(
                entity::correction_log::Column::EquipmentId.is_in(equipment_ids.iter().copied()),
            );
        }

        query.count(self.db).await
    }
}
