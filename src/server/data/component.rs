use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::work::TrackedFieldsDto;

pub struct ComponentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ComponentRepository<'a, C> {
    /// Creates a new instance of [`ComponentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        equipment_id: i32,
        part_name: &str,
        phase: Option<&str>,
        fields: &TrackedFieldsDto,
    ) -> Result<entity::component::Model, DbErr> {
        let component = entity::component::ActiveModel {
            equipment_id: ActiveValue::Set(equipment_id),
            part_name: ActiveValue::Set(part_name.to_string()),
            phase: ActiveValue::Set(phase.map(str::to_string)),
            fluid: ActiveValue::Set(fields.fluid.clone()),
            material_spec: ActiveValue::Set(fields.material_spec.clone()),
            material_grade: ActiveValue::Set(fields.material_grade.clone()),
            insulation: ActiveValue::Set(fields.insulation.clone()),
            design_temp: ActiveValue::Set(fields.design_temp.clone()),
            design_pressure: ActiveValue::Set(fields.design_pressure.clone()),
            operating_temp: ActiveValue::Set(fields.operating_temp.clone()),
            operating_pressure: ActiveValue::Set(fields.operating_pressure.clone()),
            ..Default::default()
        };

        component.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        component_id: i32,
    ) -> Result<Option<entity::component::Model>, DbErr> {
        entity::prelude::Component::find_by_id(component_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_equipment(
        &self,
        equipment_id: i32,
    ) -> Result<Vec<entity::component::Model>, DbErr> {
        entity::prelude::Component::find()
            .filter(entity::component::Column::EquipmentId.eq(equipment_id))
            .order_by_asc(entity::component::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns the components of all listed equipment
    pub async fn get_by_equipment_ids(
        &self,
        equipment_ids: &[i32],
    ) -> Result<Vec<entity::component::Model>, DbErr> {
        if equipment_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Component::find()
            .filter(entity::component::Column::EquipmentId.is_in(equipment_ids.iter().copied()))
            .order_by_asc(entity::component::Column::Id)
            .all(self.db)
            .await
    }

    /// Overwrites all eight tracked fields of a component
    pub async fn update_fields(
        &self,
        component_id: i32,
        fields: TrackedFieldsDto,
    ) -> Result<Option<entity::component::Model>, DbErr> {
        let component = match entity::prelude::Component::find_by_id(component_id)
            .one(self.db)
            .await?
        {
            Some(component) => component,
            None => return Ok(None),
        };

        let mut component_am = component.into_active_model();
        component_am.fluid = ActiveValue::Set(fields.fluid);
        component_am.material_spec = ActiveValue::Set(fields.material_spec);
        component_am.material_grade = ActiveValue::Set(fields.material_grade);
        component_am.insulation = ActiveValue::Set(fields.insulation);
        component_am.design_temp = ActiveValue::Set(fields.design_temp);
        component_am.design_pressure = ActiveValue::Set(fields.design_pressure);
        component_am.operating_temp = ActiveValue::Set(fields.operating_temp);
        component_am.operating_pressure = ActiveValue::Set(fields.operating_pressure);

        Ok(Some(component_am.update(self.db).await?))
    }
}
