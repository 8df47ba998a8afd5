//! Analytics service layer.
//!
//! Admin-only performance analytics over the work history, plus the dashboard metrics and
//! activity feed shown to every logged-in user.

pub mod activity;
pub mod aggregate;
pub mod dashboard;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDateTime, SecondsFormat, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        analytics::{
            ProductivityInsightsDto, TeamComparisonDto, UserPerformanceSummaryDto, WorkInfoDto,
            WorkTimelineDto,
        },
        user::{UserDto, UserRole},
    },
    server::{
        data::{
            correction_log::CorrectionLogRepository, equipment::EquipmentRepository,
            user::UserRepository, work::WorkRepository, work_history::WorkHistoryRepository,
        },
        error::{auth::AuthError, Error},
        service::user::user_dto,
        util::time::AnalyticsPeriod,
    },
};

/// Period used when a request does not name one
pub const DEFAULT_PERIOD: &str = "last_7_days";

/// Activity counters for one user within a period
struct ActivityStats {
    total_actions: u64,
    actions_by_type: BTreeMap<String, u64>,
    works_involved: u64,
    equipment_extracted: u64,
    corrections_made: u64,
    fields_corrected: i64,
    first_activity: Option<NaiveDateTime>,
    last_activity: Option<NaiveDateTime>,
    avg_time_per_equipment_minutes: f64,
}

/// Fails unless the user is an administrator
pub fn check_admin_permission(user: &UserDto) -> Result<(), Error> {
    if user.role != UserRole::Admin {
        tracing::warn!(
            user_id = %user.id,
            "Unauthorized analytics access attempt by {}",
            user.username
        );

        return Err(AuthError::AdminRequired(
            "Analytics features are only available to administrators".to_string(),
        )
        .into());
    }

    Ok(())
}

/// Service for admin performance analytics
pub struct AdminAnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminAnalyticsService<'a> {
    /// Creates a new instance of AdminAnalyticsService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn activity_stats(
        &self,
        user_id: i32,
        period: AnalyticsPeriod,
    ) -> Result<ActivityStats, Error> {
        let (start, end) = period.date_range(Utc::now().naive_utc());

        let history = WorkHistoryRepository::new(self.db)
            .get_by_user(user_id, start, end)
            .await?;
        let extracted = EquipmentRepository::new(self.db)
            .get_extracted_by_user(user_id, start, end)
            .await?;
        let corrections = CorrectionLogRepository::new(self.db)
            .get_by_user(user_id, start, end)
            .await?;

        let equipment_extracted = extracted.len() as u64;
        let works: HashSet<i32> = history.iter().map(|entry| entry.work_id).collect();

        Ok(ActivityStats {
            total_actions: history.len() as u64,
            actions_by_type: aggregate::actions_by_type(&history),
            works_involved: works.len() as u64,
            equipment_extracted,
            corrections_made: corrections.len() as u64,
            fields_corrected: corrections
                .iter()
                .map(|c| i64::from(c.fields_corrected))
                .sum(),
            first_activity: history.iter().map(|entry| entry.timestamp).min(),
            last_activity: history.iter().map(|entry| entry.timestamp).max(),
            avg_time_per_equipment_minutes: aggregate::avg_minutes_per_equipment(
                &history,
                equipment_extracted,
            ),
        })
    }

    /// Performance summary of one user over a period
    ///
    /// # Returns
    /// - `Ok(UserPerformanceSummaryDto)` - Counters for the user within the period
    /// - `Err(Error::AuthError(AuthError::AdminRequired))` - Caller is not an administrator
    /// - `Err(Error::NotFound)` - No user with that ID
    pub async fn get_user_performance_summary(
        &self,
        current_user: &UserDto,
        user_id: i32,
        period: Option<&str>,
    ) -> Result<UserPerformanceSummaryDto, Error> {
        check_admin_permission(current_user)?;
        let period = AnalyticsPeriod::parse(period.unwrap_or(DEFAULT_PERIOD));

        tracing::info!(
            user_id = %user_id,
            period = %period.as_str(),
            "Admin {} requesting performance summary",
            current_user.username
        );

        let user = UserRepository::new(self.db)
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User with ID {} not found", user_id)))?;
        let user = user_dto(user)?;
        let stats = self.activity_stats(user_id, period).await?;

        Ok(UserPerformanceSummaryDto {
            user_id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            period: period.as_str().to_string(),
            total_actions: stats.total_actions,
            actions_by_type: stats.actions_by_type,
            works_involved: stats.works_involved,
            equipment_extracted: stats.equipment_extracted,
            corrections_made: stats.corrections_made,
            fields_corrected: stats.fields_corrected,
            first_activity: stats.first_activity,
            last_activity: stats.last_activity,
            avg_time_per_equipment_minutes: stats.avg_time_per_equipment_minutes,
        })
    }

    /// Compares every engineer over a period, busiest first
    pub async fn get_team_comparison(
        &self,
        current_user: &UserDto,
        period: Option<&str>,
    ) -> Result<TeamComparisonDto, Error> {
        check_admin_permission(current_user)?;
        let period = AnalyticsPeriod::parse(period.unwrap_or(DEFAULT_PERIOD));

        tracing::info!(
            period = %period.as_str(),
            "Admin {} requesting team comparison",
            current_user.username
        );

        let engineers = UserRepository::new(self.db)
            .get_by_role(UserRole::Engineer.as_str())
            .await?;
        let engineer_ids: Vec<i32> = engineers.iter().map(|engineer| engineer.id).collect();

        let (start, end) = period.date_range(Utc::now().naive_utc());
        let history = WorkHistoryRepository::new(self.db)
            .get_by_users(&engineer_ids, start, end)
            .await?;
        let extracted = EquipmentRepository::new(self.db)
            .get_extracted_by_users(&engineer_ids, start, end)
            .await?;
        let corrections = CorrectionLogRepository::new(self.db)
            .get_by_users(&engineer_ids, start, end)
            .await?;

        let members = aggregate::team_members(engineers, history, &extracted, &corrections);
        let summary = aggregate::team_summary(&members, period.as_str());

        Ok(TeamComparisonDto {
            data: members,
            summary,
        })
    }

    /// Per-user activity span on a work
    ///
    /// # Returns
    /// - `Ok(WorkTimelineDto)` - One timeline per user who acted on the work
    /// - `Err(Error::AuthError(AuthError::AdminRequired))` - Caller is not an administrator
    /// - `Err(Error::NotFound)` - No work with that ID
    pub async fn get_work_timeline(
        &self,
        current_user: &UserDto,
        work_id: i32,
    ) -> Result<WorkTimelineDto, Error> {
        check_admin_permission(current_user)?;

        tracing::info!(
            work_id = %work_id,
            "Admin {} requesting work timeline",
            current_user.username
        );

        let work = WorkRepository::new(self.db)
            .get_by_id(work_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Work with ID {} not found", work_id)))?;
        let history = WorkHistoryRepository::new(self.db)
            .get_by_work_with_users(work_id)
            .await?;

        Ok(WorkTimelineDto {
            data: aggregate::user_timelines(&history),
            work_info: WorkInfoDto {
                work_id: work.id,
                work_name: work.work_name,
                status: work.status,
                created_at: work
                    .created_at
                    .and_utc()
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            },
        })
    }

    /// Hourly and daily activity patterns for one user or the whole team
    pub async fn get_productivity_insights(
        &self,
        current_user: &UserDto,
        user_id: Option<i32>,
        period: Option<&str>,
    ) -> Result<ProductivityInsightsDto, Error> {
        check_admin_permission(current_user)?;
        let period = AnalyticsPeriod::parse(period.unwrap_or(DEFAULT_PERIOD));

        tracing::info!(
            user_id = ?user_id,
            period = %period.as_str(),
            "Admin {} requesting productivity insights",
            current_user.username
        );

        let (start, end) = period.date_range(Utc::now().naive_utc());
        let history_repo = WorkHistoryRepository::new(self.db);
        let history = match user_id {
            Some(user_id) => history_repo.get_by_user(user_id, start, end).await?,
            None => history_repo.get_in_range(start, end).await?,
        };

        let timestamps: Vec<NaiveDateTime> = history.iter().map(|entry| entry.timestamp).collect();
        let hourly_productivity = aggregate::hourly_productivity(&timestamps);
        let daily_activity = aggregate::daily_activity(&timestamps);

        Ok(ProductivityInsightsDto {
            peak_hours: aggregate::peak_hours(&hourly_productivity),
            insights: aggregate::insights(&daily_activity),
            hourly_productivity,
            daily_activity,
        })
    }
}
