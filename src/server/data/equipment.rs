use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use super::within_range;

pub struct EquipmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EquipmentRepository<'a, C> {
    /// Creates a new instance of [`EquipmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates equipment that has not been extracted yet
    pub async fn create(
        &self,
        work_id: i32,
        equipment_no: &str,
        pmt_no: Option<&str>,
        description: Option<&str>,
    ) -> Result<entity::equipment::Model, DbErr> {
        let equipment = entity::equipment::ActiveModel {
            work_id: ActiveValue::Set(work_id),
            equipment_no: ActiveValue::Set(equipment_no.to_string()),
            pmt_no: ActiveValue::Set(pmt_no.map(str::to_string)),
            description: ActiveValue::Set(description.map(str::to_string)),
            drawing_path: ActiveValue::Set(None),
            extracted_by: ActiveValue::Set(None),
            extracted_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        equipment.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        equipment_id: i32,
    ) -> Result<Option<entity::equipment::Model>, DbErr> {
        entity::prelude::Equipment::find_by_id(equipment_id)
            .one(self.db)
            .await
    }

    /// Returns a work's equipment ordered by equipment number
    pub async fn get_by_work(&self, work_id: i32) -> Result<Vec<entity::equipment::Model>, DbErr> {
        entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::WorkId.eq(work_id))
            .order_by_asc(entity::equipment::Column::EquipmentNo)
            .all(self.db)
            .await
    }

    /// Returns the equipment of all listed works
    pub async fn get_by_works(
        &self,
        work_ids: &[i32],
    ) -> Result<Vec<entity::equipment::Model>, DbErr> {
        if work_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::WorkId.is_in(work_ids.iter().copied()))
            .order_by_asc(entity::equipment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_number(
        &self,
        work_id: i32,
        equipment_no: &str,
    ) -> Result<Option<entity::equipment::Model>, DbErr> {
        entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::WorkId.eq(work_id))
            .filter(entity::equipment::Column::EquipmentNo.eq(equipment_no))
            .one(self.db)
            .await
    }

    pub async fn get_id_by_number(
        &self,
        work_id: i32,
        equipment_no: &str,
    ) -> Result<Option<i32>, DbErr> {
        entity::prelude::Equipment::find()
            .select_only()
            .column(entity::equipment::Column::Id)
            .filter(entity::equipment::Column::WorkId.eq(work_id))
            .filter(entity::equipment::Column::EquipmentNo.eq(equipment_no))
            .into_tuple::<i32>()
            .one(self.db)
            .await
    }

    /// Returns equipment extracted by a user within the optional time range
    pub async fn get_extracted_by_user(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::equipment::Model>, DbErr> {
        let query = entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::ExtractedBy.eq(user_id));

        within_range(query, entity::equipment::Column::ExtractedDate, start, end)
            .order_by_asc(entity::equipment::Column::ExtractedDate)
            .all(self.db)
            .await
    }

    /// Returns equipment extracted by any of the listed users within the optional time range
    pub async fn get_extracted_by_users(
        &self,
        user_ids: &[i32],
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::equipment::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::ExtractedBy.is_in(user_ids.iter().copied()));

        within_range(query, entity::equipment::Column::ExtractedDate, start, end)
            .order_by_asc(entity::equipment::Column::ExtractedDate)
            .all(self.db)
            .await
    }

    /// Records who extracted the equipment and when, plus the source drawing if known
    pub async fn mark_extracted(
        &self,
        equipment_id: i32,
        user_id: i32,
        extracted_at: NaiveDateTime,
        drawing_path: Option<&str>,
    ) -> Result<Option<entity::equipment::Model>, DbErr> {
        let equipment = match entity::prelude::Equipment::find_by_id(equipment_id)
            .one(self.db)
            .await?
        {
            Some(equipment) => equipment,
            None => return Ok(None),
        };

        let mut equipment_am = equipment.into_active_model();
        equipment_am.extracted_by = ActiveValue::Set(Some(user_id));
        equipment_am.extracted_date = ActiveValue::Set(Some(extracted_at));
        if let Some(drawing_path) = drawing_path {
            equipment_am.drawing_path = ActiveValue::Set(Some(drawing_path.to_string()));
        }

        Ok(Some(equipment_am.update(self.db).await?))
    }
}
