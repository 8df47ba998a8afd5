use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        analytics::{
            ActivityItemDto, ActivityQuery, AnalyticsSummaryDto, DashboardMetricsDto, PeriodQuery,
            ProductivityInsightsDto, TeamComparisonDto, UserPerformanceSummaryDto,
            WorkTimelineDto,
        },
        api::ErrorDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::analytics::{
            activity::DEFAULT_ACTIVITY_LIMIT, dashboard::DashboardService, AdminAnalyticsService,
        },
    },
};

pub static ANALYTICS_TAG: &str = "analytics";

/// Work, equipment and correction totals for the user's works with recent activity
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics_summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let dashboard_service = DashboardService::new(&state.db);

    let summary = dashboard_service.analytics_summary(&user).await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Completion and health metrics for the dashboard
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardMetricsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let dashboard_service = DashboardService::new(&state.db);

    let metrics = dashboard_service.dashboard_metrics(&user).await?;

    Ok((StatusCode::OK, Json(metrics)))
}

/// Newest work history entries visible to the user
#[utoipa::path(
    get,
    path = "/api/analytics/activity",
    tag = ANALYTICS_TAG,
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activity", body = Vec<ActivityItemDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recent_activity(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let dashboard_service = DashboardService::new(&state.db);

    let activity = dashboard_service
        .recent_activity(&user, query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT))
        .await?;

    Ok((StatusCode::OK, Json(activity)))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/users/{user_id}",
    tag = ANALYTICS_TAG,
    params(("user_id" = i32, Path, description = "User ID"), PeriodQuery),
    responses(
        (status = 200, description = "Performance summary", body = UserPerformanceSummaryDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_performance(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let analytics_service = AdminAnalyticsService::new(&state.db);

    let summary = analytics_service
        .get_user_performance_summary(&user, user_id, query.period.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/team",
    tag = ANALYTICS_TAG,
    params(PeriodQuery),
    responses(
        (status = 200, description = "Engineers compared by activity", body = TeamComparisonDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team_comparison(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let analytics_service = AdminAnalyticsService::new(&state.db);

    let comparison = analytics_service
        .get_team_comparison(&user, query.period.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(comparison)))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/works/{work_id}",
    tag = ANALYTICS_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Per-user timeline of the work", body = WorkTimelineDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work_timeline(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let analytics_service = AdminAnalyticsService::new(&state.db);

    let timeline = analytics_service.get_work_timeline(&user, work_id).await?;

    Ok((StatusCode::OK, Json(timeline)))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/productivity",
    tag = ANALYTICS_TAG,
    params(PeriodQuery),
    responses(
        (status = 200, description = "Hourly and daily activity patterns", body = ProductivityInsightsDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_productivity_insights(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let analytics_service = AdminAnalyticsService::new(&state.db);

    let insights = analytics_service
        .get_productivity_insights(&user, query.user_id, query.period.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(insights)))
}
