use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::user::UserRole;

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// One of `today`, `last_7_days`, `last_month` or `all`, defaults to `last_7_days`
    pub period: Option<String>,
    /// Restrict productivity insights to a single user
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Number of entries, defaults to 10
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPerformanceSummaryDto {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub period: String,
    pub total_actions: u64,
    pub actions_by_type: BTreeMap<String, u64>,
    pub works_involved: u64,
    pub equipment_extracted: u64,
    pub corrections_made: u64,
    pub fields_corrected: i64,
    pub first_activity: Option<NaiveDateTime>,
    pub last_activity: Option<NaiveDateTime>,
    pub avg_time_per_equipment_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberPerformanceDto {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub total_actions: u64,
    pub equipment_extracted: u64,
    pub corrections_made: u64,
    pub avg_time_per_equipment_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamSummaryDto {
    pub total_engineers: u64,
    pub total_team_actions: u64,
    pub total_equipment_extracted: u64,
    pub team_avg_time_per_equipment: f64,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamComparisonDto {
    pub data: Vec<TeamMemberPerformanceDto>,
    pub summary: TeamSummaryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserWorkTimelineDto {
    pub user_id: i32,
    pub username: String,
    pub first_action: NaiveDateTime,
    pub last_action: NaiveDateTime,
    pub duration_minutes: f64,
    pub action_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkInfoDto {
    pub work_id: i32,
    pub work_name: String,
    pub status: String,
    /// ISO-8601 creation timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkTimelineDto {
    pub data: Vec<UserWorkTimelineDto>,
    pub work_info: WorkInfoDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HourlyProductivityDto {
    pub hour: u32,
    pub action_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyActivityDto {
    pub date: NaiveDate,
    pub action_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeakHoursDto {
    pub most_productive_hour: u32,
    pub most_productive_count: u64,
    pub least_productive_hour: u32,
    pub least_productive_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsightsDto {
    pub total_days_active: u64,
    pub avg_actions_per_day: f64,
    pub most_active_day: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductivityInsightsDto {
    pub hourly_productivity: Vec<HourlyProductivityDto>,
    pub daily_activity: Vec<DailyActivityDto>,
    /// Absent when there was no activity in the period
    pub peak_hours: Option<PeakHoursDto>,
    pub insights: InsightsDto,
}

/// Coarse rating of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HealthStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardMetricsDto {
    /// Mean completion percentage across works
    pub work_completion: u32,
    pub total_equipment: u64,
    pub equipment_extracted: u64,
    pub avg_health_score: u32,
    pub health_status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityItemDto {
    pub action_type: String,
    pub description: String,
    pub user: String,
    pub time_ago: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsSummaryDto {
    pub total_works: u64,
    pub total_equipment: u64,
    pub equipment_extracted: u64,
    pub total_corrections: u64,
    /// Extracted equipment as a percentage of all equipment, one decimal place
    pub success_rate: f64,
    pub recent_activity: Vec<ActivityItemDto>,
}
