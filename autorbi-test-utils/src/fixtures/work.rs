use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn work(&self) -> WorkFixtures<'_> {
        WorkFixtures { setup: self }
    }
}

pub struct WorkFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> WorkFixtures<'a> {
    pub async fn insert_work(
        &self,
        work_name: &str,
        created_by: Option<i32>,
    ) -> Result<entity::work::Model, TestError> {
        Ok(
            entity::prelude::Work::insert(entity::work::ActiveModel {
                work_name: ActiveValue::Set(work_name.to_string()),
                description: ActiveValue::Set(None),
                status: ActiveValue::Set("Pending".to_string()),
                excel_path: ActiveValue::Set(None),
                ppt_path: ActiveValue::Set(None),
                created_by: ActiveValue::Set(created_by),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn assign_user(
        &self,
        work_id: i32,
        user_id: i32,
    ) -> Result<entity::assign_work::Model, TestError> {
        Ok(
            entity::prelude::AssignWork::insert(entity::assign_work::ActiveModel {
                work_id: ActiveValue::Set(work_id),
                user_id: ActiveValue::Set(user_id),
                assigned_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert equipment; `extracted` marks it extracted by that user at the given time
    pub async fn insert_equipment(
        &self,
        work_id: i32,
        equipment_no: &str,
        extracted: Option<(i32, NaiveDateTime)>,
    ) -> Result<entity::equipment::Model, TestError> {
        Ok(
            entity::prelude::Equipment::insert(entity::equipment::ActiveModel {
                work_id: ActiveValue::Set(work_id),
                equipment_no: ActiveValue::Set(equipment_no.to_string()),
                pmt_no: ActiveValue::Set(None),
                description: ActiveValue::Set(None),
                drawing_path: ActiveValue::Set(None),
                extracted_by: ActiveValue::Set(extracted.map(|(user_id, _)| user_id)),
                extracted_date: ActiveValue::Set(extracted.map(|(_, date)| date)),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a component with the named tracked fields filled in
    ///
    /// Field names match the component column names, e.g. `("fluid", "Water")`.
    pub async fn insert_component(
        &self,
        equipment_id: i32,
        part_name: &str,
        fields: &[(&str, &str)],
    ) -> Result<entity::component::Model, TestError> {
        let mut component = entity::component::ActiveModel {
            equipment_id: ActiveValue::Set(equipment_id),
            part_name: ActiveValue::Set(part_name.to_string()),
            phase: ActiveValue::Set(None),
            fluid: ActiveValue::Set(None),
            material_spec: ActiveValue::Set(None),
            material_grade: ActiveValue::Set(None),
            insulation: ActiveValue::Set(None),
            design_temp: ActiveValue::Set(None),
            design_pressure: ActiveValue::Set(None),
            operating_temp: ActiveValue::Set(None),
            operating_pressure: ActiveValue::Set(None),
            ..Default::default()
        };

        for (field, value) in fields {
            let value = ActiveValue::Set(Some(value.to_string()));
            match *field {
                "phase" => component.phase = value,
                "fluid" => component.fluid = value,
                "material_spec" => component.material_spec = value,
                "material_grade" => component.material_grade = value,
                "insulation" => component.insulation = value,
                "design_temp" => component.design_temp = value,
                "design_pressure" => component.design_pressure = value,
                "operating_temp" => component.operating_temp = value,
                "operating_pressure" => component.operating_pressure = value,
                other => return Err(TestError::UnknownField(other.to_string())),
            }
        }

        Ok(entity::prelude::Component::insert(component)
            .exec_with_returning(&self.setup.db)
            .await?)
    }

    pub async fn insert_history(
        &self,
        work_id: i32,
        user_id: i32,
        action_type: &str,
        timestamp: NaiveDateTime,
    ) -> Result<entity::work_history::Model, TestError> {
        Ok(
            entity::prelude::WorkHistory::insert(entity::work_history::ActiveModel {
                work_id: ActiveValue::Set(work_id),
                user_id: ActiveValue::Set(user_id),
                action_type: ActiveValue::Set(action_type.to_string()),
                description: ActiveValue::Set(None),
                timestamp: ActiveValue::Set(timestamp),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_correction(
        &self,
        equipment_id: i32,
        user_id: i32,
        fields_corrected: i32,
        total_fields: i32,
        timestamp: NaiveDateTime,
    ) -> Result<entity::correction_log::Model, TestError> {
        Ok(
            entity::prelude::CorrectionLog::insert(entity::correction_log::ActiveModel {
                equipment_id: ActiveValue::Set(equipment_id),
                user_id: ActiveValue::Set(user_id),
                fields_corrected: ActiveValue::Set(fields_corrected),
                total_fields: ActiveValue::Set(total_fields),
                timestamp: ActiveValue::Set(timestamp),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
