//! Manual corrections of extracted component data.
//!
//! Engineers fill in tracked fields the extraction left blank. Existing values are never
//! overwritten, and every correction is logged with how many of the blank fields were filled.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::work::{is_blank, ComponentCorrectionDto, CorrectionResultDto, TrackedFieldsDto},
    server::{
        data::{
            component::ComponentRepository, correction_log::CorrectionLogRepository,
            equipment::EquipmentRepository, work_history::WorkHistoryRepository,
        },
        error::{validation::ValidationError, Error},
        model::db::{ComponentModel, CorrectionLogModel},
        service::work::{action, tracked_fields},
    },
};

/// Counts the tracked fields blank on `original` and how many of those `corrected` fills
///
/// # Returns
/// `(to_fill, corrected)` where `corrected <= to_fill`
pub fn count_correction_fields(
    original: &ComponentModel,
    corrected: &TrackedFieldsDto,
) -> (i32, i32) {
    let original = tracked_fields(original);

    original
        .values()
        .into_iter()
        .zip(corrected.values())
        .filter(|(original, _)| is_blank(*original))
        .fold((0, 0), |(to_fill, filled), (_, corrected)| {
            (to_fill + 1, filled + i32::from(!is_blank(corrected)))
        })
}

pub struct CorrectionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CorrectionService<'a> {
    /// Creates a new instance of CorrectionService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes corrected values into blank fields of an equipment's components
    ///
    /// All components are updated in one transaction together with the correction log row
    /// and a `data_corrected` history entry.
    ///
    /// # Returns
    /// - `Ok(CorrectionResultDto)` - Totals across all corrected components
    /// - `Err(Error::NotFound)` - The equipment or one of the components does not exist
    /// - `Err(Error::ValidationError)` - A component belongs to different equipment
    pub async fn apply_corrections(
        &self,
        equipment_id: i32,
        user_id: i32,
        corrections: Vec<ComponentCorrectionDto>,
    ) -> Result<CorrectionResultDto, Error> {
        let equipment = EquipmentRepository::new(self.db)
            .get_by_id(equipment_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Equipment with ID {} not found", equipment_id))
            })?;

        let txn = self.db.begin().await?;
        let component_repo = ComponentRepository::new(&txn);

        let mut total_fields = 0;
        let mut fields_corrected = 0;
        for correction in corrections {
            let component = component_repo
                .get_by_id(correction.component_id)
                .await?
                .ok_or_else(|| {
                    Error::NotFound(format!(
                        "Component with ID {} not found",
                        correction.component_id
                    ))
                })?;
            if component.equipment_id != equipment_id {
                return Err(ValidationError::ComponentMismatch {
                    component_id: component.id,
                    equipment_id,
                }
                .into());
            }

            let (to_fill, corrected) = count_correction_fields(&component, &correction.values);
            total_fields += to_fill;
            fields_corrected += corrected;

            if corrected > 0 {
                let merged = tracked_fields(&component).fill_blanks_from(&correction.values);
                component_repo.update_fields(component.id, merged).await?;
            }
        }

        let entry = CorrectionLogRepository::new(&txn)
            .create(equipment_id, user_id, fields_corrected, total_fields)
            .await?;
        WorkHistoryRepository::new(&txn)
            .create(
                equipment.work_id,
                user_id,
                action::DATA_CORRECTED,
                Some(&format!(
                    "Corrected {} of {} fields on equipment {}",
                    fields_corrected, total_fields, equipment.equipment_no
                )),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            equipment_id = %equipment_id,
            user_id = %user_id,
            "Corrected {}/{} fields",
            fields_corrected,
            total_fields
        );

        Ok(CorrectionResultDto {
            correction_log_id: entry.id,
            fields_corrected,
            total_fields,
        })
    }

    /// Records a correction made outside [`Self::apply_corrections`]
    pub async fn log_correction(
        &self,
        equipment_id: i32,
        user_id: i32,
        fields_corrected: i32,
        total_fields: i32,
    ) -> Result<CorrectionLogModel, Error> {
        if fields_corrected < 0 || fields_corrected > total_fields {
            return Err(ValidationError::CorrectionExceedsTotal {
                fields_corrected,
                total_fields,
            }
            .into());
        }

        Ok(CorrectionLogRepository::new(self.db)
            .create(equipment_id, user_id, fields_corrected, total_fields)
            .await?)
    }
}
