use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        analytics::{ActivityItemDto, AnalyticsSummaryDto, DashboardMetricsDto},
        user::{UserDto, UserRole},
        work::TrackedFieldsDto,
    },
    server::{
        data::{
            component::ComponentRepository, correction_log::CorrectionLogRepository,
            equipment::EquipmentRepository, work::WorkRepository,
        },
        error::Error,
        model::db::EquipmentModel,
        service::{
            analytics::{activity, aggregate},
            work::tracked_fields,
        },
    },
};

/// IDs of the works an engineer is assigned to, `None` for administrators who see every work
pub async fn scoped_work_ids(
    db: &DatabaseConnection,
    user: &UserDto,
) -> Result<Option<Vec<i32>>, Error> {
    match user.role {
        UserRole::Admin => Ok(None),
        UserRole::Engineer => Ok(Some(
            WorkRepository::new(db).get_assigned_work_ids(user.id).await?,
        )),
    }
}

/// Dashboard metrics and the activity feed for any logged-in user
pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    /// Creates a new instance of DashboardService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Work IDs and their equipment visible to the user
    async fn visible_equipment(
        &self,
        user: &UserDto,
    ) -> Result<(Vec<i32>, Vec<EquipmentModel>), Error> {
        let work_ids = match scoped_work_ids(self.db, user).await? {
            Some(work_ids) => work_ids,
            None => WorkRepository::new(self.db)
                .get_all()
                .await?
                .into_iter()
                .map(|work| work.id)
                .collect(),
        };
        let equipment = EquipmentRepository::new(self.db)
            .get_by_works(&work_ids)
            .await?;

        Ok((work_ids, equipment))
    }

    /// Completion and health metrics across the works visible to the user
    ///
    /// Completion is averaged over every work, health only over works with components.
    pub async fn dashboard_metrics(&self, user: &UserDto) -> Result<DashboardMetricsDto, Error> {
        let (work_ids, equipment) = self.visible_equipment(user).await?;

        let equipment_ids: Vec<i32> = equipment.iter().map(|e| e.id).collect();
        let components = ComponentRepository::new(self.db)
            .get_by_equipment_ids(&equipment_ids)
            .await?;

        let work_of_equipment: HashMap<i32, i32> =
            equipment.iter().map(|e| (e.id, e.work_id)).collect();

        let mut equipment_per_work: HashMap<i32, (u64, u64)> = HashMap::new();
        for item in &equipment {
            let (total, extracted) = equipment_per_work.entry(item.work_id).or_default();
            *total += 1;
            if item.extracted_date.is_some() {
                *extracted += 1;
            }
        }

        let mut fields_per_work: HashMap<i32, Vec<TrackedFieldsDto>> = HashMap::new();
        for component in &components {
            if let Some(work_id) = work_of_equipment.get(&component.equipment_id) {
                fields_per_work
                    .entry(*work_id)
                    .or_default()
                    .push(tracked_fields(component));
            }
        }

        let completion: Vec<u32> = work_ids
            .iter()
            .map(|work_id| {
                let (total, extracted) =
                    equipment_per_work.get(work_id).copied().unwrap_or_default();
                aggregate::completion_percentage(extracted, total)
            })
            .collect();
        let health: Vec<u32> = work_ids
            .iter()
            .filter_map(|work_id| {
                fields_per_work
                    .get(work_id)
                    .and_then(|fields| aggregate::health_score(fields))
            })
            .collect();

        let avg_health_score = aggregate::mean(&health);

        Ok(DashboardMetricsDto {
            work_completion: aggregate::mean(&completion),
            total_equipment: equipment.len() as u64,
            equipment_extracted: equipment
                .iter()
                .filter(|e| e.extracted_date.is_some())
                .count() as u64,
            avg_health_score,
            health_status: aggregate::health_status(avg_health_score),
        })
    }

    /// Work, equipment and correction totals with the recent activity feed
    pub async fn analytics_summary(&self, user: &UserDto) -> Result<AnalyticsSummaryDto, Error> {
        let (work_ids, equipment) = self.visible_equipment(user).await?;

        let total_equipment = equipment.len() as u64;
        let equipment_extracted = equipment
            .iter()
            .filter(|e| e.extracted_date.is_some())
            .count() as u64;

        let correction_repo = CorrectionLogRepository::new(self.db);
        let total_corrections = match user.role {
            UserRole::Admin => correction_repo.count(None).await?,
            UserRole::Engineer => {
                let equipment_ids: Vec<i32> = equipment.iter().map(|e| e.id).collect();
                correction_repo.count(Some(&equipment_ids)).await?
            }
        };

        Ok(AnalyticsSummaryDto {
            total_works: work_ids.len() as u64,
            total_equipment,
            equipment_extracted,
            total_corrections,
            success_rate: aggregate::success_rate(equipment_extracted, total_equipment),
            recent_activity: self
                .recent_activity(user, activity::DEFAULT_ACTIVITY_LIMIT)
                .await?,
        })
    }

    pub async fn recent_activity(
        &self,
        user: &UserDto,
        limit: u64,
    ) -> Result<Vec<ActivityItemDto>, Error> {
        activity::recent_activity(self.db, user, limit).await
    }
}
