//! Work service layer.
//!
//! Works group the equipment extracted from one set of drawings. Administrators create works
//! and assign engineers, engineers only see the works they are assigned to. Every change to a
//! work is recorded in its history.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        user::{UserDto, UserRole, UserStatus},
        work::{
            BatchSaveEquipmentDto, BatchSaveResultDto, ComponentDto, CreateWorkDto, EquipmentDto,
            EquipmentEntryDto, TrackedFieldsDto, UpdateWorkReportsDto, WorkDto, WorkHistoryDto,
            WorkStatus,
        },
    },
    server::{
        data::{
            component::ComponentRepository,
            equipment::EquipmentRepository,
            user::UserRepository,
            work::{WorkReportChanges, WorkRepository},
            work_history::WorkHistoryRepository,
        },
        error::{auth::AuthError, validation::ValidationError, Error},
        model::db::{ComponentModel, EquipmentModel, WorkHistoryModel, WorkModel},
        service::user::user_dto,
    },
};

/// Action types written to the work history
pub mod action {
    pub const WORK_CREATED: &str = "work_created";
    pub const WORK_ASSIGNED: &str = "work_assigned";
    pub const EQUIPMENT_EXTRACTED: &str = "equipment_extracted";
    pub const DATA_CORRECTED: &str = "data_corrected";
    pub const REPORTS_GENERATED: &str = "reports_generated";
    pub const STATUS_CHANGED: &str = "status_changed";
}

pub fn work_dto(work: WorkModel) -> WorkDto {
    WorkDto {
        id: work.id,
        work_name: work.work_name,
        description: work.description,
        status: WorkStatus::parse(&work.status).unwrap_or_default(),
        excel_path: work.excel_path,
        ppt_path: work.ppt_path,
        created_by: work.created_by,
        created_at: work.created_at,
    }
}

pub fn tracked_fields(component: &ComponentModel) -> TrackedFieldsDto {
    TrackedFieldsDto {
        fluid: component.fluid.clone(),
        material_spec: component.material_spec.clone(),
        material_grade: component.material_grade.clone(),
        insulation: component.insulation.clone(),
        design_temp: component.design_temp.clone(),
        design_pressure: component.design_pressure.clone(),
        operating_temp: component.operating_temp.clone(),
        operating_pressure: component.operating_pressure.clone(),
    }
}

fn component_dto(component: ComponentModel) -> ComponentDto {
    ComponentDto {
        fields: tracked_fields(&component),
        id: component.id,
        equipment_id: component.equipment_id,
        part_name: component.part_name,
        phase: component.phase,
    }
}

fn equipment_dto(equipment: EquipmentModel, components: Vec<ComponentModel>) -> EquipmentDto {
    EquipmentDto {
        id: equipment.id,
        work_id: equipment.work_id,
        equipment_no: equipment.equipment_no,
        pmt_no: equipment.pmt_no,
        description: equipment.description,
        drawing_path: equipment.drawing_path,
        extracted_by: equipment.extracted_by,
        extracted_date: equipment.extracted_date,
        components: components.into_iter().map(component_dto).collect(),
    }
}

pub fn history_dto(entry: WorkHistoryModel) -> WorkHistoryDto {
    WorkHistoryDto {
        id: entry.id,
        work_id: entry.work_id,
        user_id: entry.user_id,
        action_type: entry.action_type,
        description: entry.description,
        timestamp: entry.timestamp,
    }
}

fn work_not_found(work_id: i32) -> Error {
    Error::NotFound(format!("Work with ID {} not found", work_id))
}

/// Service for works, their equipment and their history
pub struct WorkService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkService<'a> {
    /// Creates a new instance of WorkService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending work and records who created it
    pub async fn create_work(&self, created_by: i32, work: CreateWorkDto) -> Result<WorkDto, Error> {
        let work_name = work.work_name.trim();
        if work_name.is_empty() {
            return Err(ValidationError::WorkNameRequired.into());
        }
        let description = work
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let txn = self.db.begin().await?;

        let created = WorkRepository::new(&txn)
            .create(work_name, description, WorkStatus::Pending.as_str(), Some(created_by))
            .await?;
        WorkHistoryRepository::new(&txn)
            .create(
                created.id,
                created_by,
                action::WORK_CREATED,
                Some(&format!("Created work {}", created.work_name)),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(work_id = %created.id, user_id = %created_by, "Created work {}", created.work_name);

        Ok(work_dto(created))
    }

    /// Lists every work for administrators and the assigned works for engineers
    pub async fn list_works(&self, user: &UserDto) -> Result<Vec<WorkDto>, Error> {
        let work_repo = WorkRepository::new(self.db);

        let works = match user.role {
            UserRole::Admin => work_repo.get_all().await?,
            UserRole::Engineer => work_repo.get_assigned_to_user(user.id).await?,
        };

        Ok(works.into_iter().map(work_dto).collect())
    }

    /// Fails unless the user may see the work
    ///
    /// # Returns
    /// - `Ok(WorkModel)` - The work, visible to the user
    /// - `Err(Error::NotFound)` - The work does not exist
    /// - `Err(Error::AuthError(AuthError::WorkNotAssigned))` - An engineer not assigned to it
    pub async fn ensure_access(&self, user: &UserDto, work_id: i32) -> Result<WorkModel, Error> {
        let work_repo = WorkRepository::new(self.db);

        let work = work_repo
            .get_by_id(work_id)
            .await?
            .ok_or_else(|| work_not_found(work_id))?;

        if user.role != UserRole::Admin && !work_repo.is_assigned(work_id, user.id).await? {
            return Err(AuthError::WorkNotAssigned(work_id).into());
        }

        Ok(work)
    }

    /// Fails unless the user may see the work the equipment belongs to
    pub async fn ensure_equipment_access(
        &self,
        user: &UserDto,
        equipment_id: i32,
    ) -> Result<EquipmentModel, Error> {
        let equipment = EquipmentRepository::new(self.db)
            .get_by_id(equipment_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Equipment with ID {} not found", equipment_id))
            })?;

        self.ensure_access(user, equipment.work_id).await?;

        Ok(equipment)
    }

    pub async fn get_work(&self, user: &UserDto, work_id: i32) -> Result<WorkDto, Error> {
        Ok(work_dto(self.ensure_access(user, work_id).await?))
    }

    /// Assigns an active engineer to a work and records it in the work history
    pub async fn assign_engineer(
        &self,
        assigned_by: i32,
        work_id: i32,
        user_id: i32,
    ) -> Result<(), Error> {
        let work = WorkRepository::new(self.db)
            .get_by_id(work_id)
            .await?
            .ok_or_else(|| work_not_found(work_id))?;

        let engineer = match UserRepository::new(self.db).get_by_id(user_id).await? {
            Some(user) => user_dto(user)?,
            None => return Err(Error::NotFound(format!("User with ID {} not found", user_id))),
        };
        if engineer.role != UserRole::Engineer || engineer.status != UserStatus::Active {
            return Err(ValidationError::NotAnEngineer(user_id).into());
        }

        let txn = self.db.begin().await?;
        let work_repo = WorkRepository::new(&txn);

        if work_repo.is_assigned(work_id, user_id).await? {
            return Err(ValidationError::AlreadyAssigned { work_id, user_id }.into());
        }

        work_repo.assign_user(work_id, user_id).await?;
        WorkHistoryRepository::new(&txn)
            .create(
                work_id,
                assigned_by,
                action::WORK_ASSIGNED,
                Some(&format!(
                    "Assigned {} to {}",
                    engineer.username, work.work_name
                )),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(work_id = %work_id, user_id = %user_id, "Assigned engineer to work");

        Ok(())
    }

    /// Records report output paths and optionally advances the work's status
    pub async fn update_reports(
        &self,
        user_id: i32,
        work_id: i32,
        update: UpdateWorkReportsDto,
    ) -> Result<WorkDto, Error> {
        let reports_changed = update.excel_path.is_some() || update.ppt_path.is_some();
        let status = update.status;

        let txn = self.db.begin().await?;

        let updated = WorkRepository::new(&txn)
            .update_reports(
                work_id,
                WorkReportChanges {
                    excel_path: update.excel_path,
                    ppt_path: update.ppt_path,
                    status: status.map(|s| s.as_str().to_string()),
                },
            )
            .await?
            .ok_or_else(|| work_not_found(work_id))?;

        let history_repo = WorkHistoryRepository::new(&txn);
        if reports_changed {
            history_repo
                .create(work_id, user_id, action::REPORTS_GENERATED, None)
                .await?;
        }
        if let Some(status) = status {
            history_repo
                .create(
                    work_id,
                    user_id,
                    action::STATUS_CHANGED,
                    Some(&format!("Status changed to {}", status)),
                )
                .await?;
        }

        txn.commit().await?;

        Ok(work_dto(updated))
    }

    /// Saves a batch of extracted equipment
    ///
    /// Each entry is stored in its own transaction. An entry that fails, for instance because
    /// the equipment number already exists in the work, is counted as a failure and does not
    /// affect the others.
    pub async fn batch_save_equipment(
        &self,
        work_id: i32,
        user_id: i32,
        batch: BatchSaveEquipmentDto,
    ) -> Result<BatchSaveResultDto, Error> {
        if WorkRepository::new(self.db).get_by_id(work_id).await?.is_none() {
            return Err(work_not_found(work_id));
        }

        let mut result = BatchSaveResultDto {
            success: 0,
            failures: 0,
        };

        for entry in batch.entries {
            let drawing_path = batch.drawing_paths.get(entry.equipment_no.trim());
            let equipment_no = entry.equipment_no.clone();

            match self
                .save_equipment(work_id, user_id, entry, drawing_path.map(String::as_str))
                .await
            {
                Ok(_) => result.success += 1,
                Err(e) => {
                    tracing::warn!(
                        work_id = %work_id,
                        "Failed to save equipment {}: {}",
                        equipment_no,
                        e
                    );
                    result.failures += 1;
                }
            }
        }

        tracing::info!(
            work_id = %work_id,
            user_id = %user_id,
            "Saved {} equipment with {} failures",
            result.success,
            result.failures
        );

        Ok(result)
    }

    async fn save_equipment(
        &self,
        work_id: i32,
        user_id: i32,
        entry: EquipmentEntryDto,
        drawing_path: Option<&str>,
    ) -> Result<EquipmentModel, Error> {
        let equipment_no = entry.equipment_no.trim();
        if equipment_no.is_empty() {
            return Err(ValidationError::EquipmentNoRequired.into());
        }

        let txn = self.db.begin().await?;
        let equipment_repo = EquipmentRepository::new(&txn);

        if equipment_repo
            .get_id_by_number(work_id, equipment_no)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateEquipment(equipment_no.to_string()).into());
        }

        let equipment = equipment_repo
            .create(
                work_id,
                equipment_no,
                entry.pmt_no.as_deref(),
                entry.description.as_deref(),
            )
            .await?;

        let component_repo = ComponentRepository::new(&txn);
        for component in &entry.components {
            component_repo
                .create(
                    equipment.id,
                    &component.part_name,
                    component.phase.as_deref(),
                    &component.fields,
                )
                .await?;
        }

        let equipment = equipment_repo
            .mark_extracted(equipment.id, user_id, Utc::now().naive_utc(), drawing_path)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Equipment ID {} missing right after it was created",
                    equipment.id
                ))
            })?;

        WorkHistoryRepository::new(&txn)
            .create(
                work_id,
                user_id,
                action::EQUIPMENT_EXTRACTED,
                Some(&format!("Extracted data for equipment {}", equipment_no)),
            )
            .await?;

        txn.commit().await?;

        Ok(equipment)
    }

    /// Returns a work's equipment with components, ordered by equipment number
    pub async fn get_equipment_by_work(&self, work_id: i32) -> Result<Vec<EquipmentDto>, Error> {
        let equipment = EquipmentRepository::new(self.db).get_by_work(work_id).await?;
        let equipment_ids: Vec<i32> = equipment.iter().map(|e| e.id).collect();

        let mut components: HashMap<i32, Vec<ComponentModel>> = HashMap::new();
        for component in ComponentRepository::new(self.db)
            .get_by_equipment_ids(&equipment_ids)
            .await?
        {
            components
                .entry(component.equipment_id)
                .or_default()
                .push(component);
        }

        Ok(equipment
            .into_iter()
            .map(|e| {
                let parts = components.remove(&e.id).unwrap_or_default();
                equipment_dto(e, parts)
            })
            .collect())
    }

    pub async fn get_equipment_by_work_and_number(
        &self,
        work_id: i32,
        equipment_no: &str,
    ) -> Result<Option<EquipmentDto>, Error> {
        let Some(equipment) = EquipmentRepository::new(self.db)
            .get_by_number(work_id, equipment_no)
            .await?
        else {
            return Ok(None);
        };

        let components = ComponentRepository::new(self.db)
            .get_by_equipment(equipment.id)
            .await?;

        Ok(Some(equipment_dto(equipment, components)))
    }

    pub async fn get_equipment_id_by_number(
        &self,
        work_id: i32,
        equipment_no: &str,
    ) -> Result<Option<i32>, Error> {
        Ok(EquipmentRepository::new(self.db)
            .get_id_by_number(work_id, equipment_no)
            .await?)
    }

    /// Appends an entry to a work's history
    pub async fn log_work_history(
        &self,
        work_id: i32,
        user_id: i32,
        action_type: &str,
        description: Option<&str>,
    ) -> Result<WorkHistoryDto, Error> {
        let entry = WorkHistoryRepository::new(self.db)
            .create(work_id, user_id, action_type, description)
            .await?;

        Ok(history_dto(entry))
    }

    /// Returns a work's history, oldest first
    pub async fn get_history(&self, work_id: i32) -> Result<Vec<WorkHistoryDto>, Error> {
        let history = WorkHistoryRepository::new(self.db)
            .get_by_work(work_id)
            .await?;

        Ok(history.into_iter().map(history_dto).collect())
    }
}
