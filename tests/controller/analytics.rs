use autorbi::{
    model::analytics::{
        ActivityItemDto, ActivityQuery, AnalyticsSummaryDto, DashboardMetricsDto, PeriodQuery,
        ProductivityInsightsDto, TeamComparisonDto, UserPerformanceSummaryDto,
    },
    server::controller::analytics::{
        get_analytics_summary, get_dashboard_metrics, get_productivity_insights,
        get_recent_activity, get_team_comparison, get_user_performance, get_work_timeline,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};

use super::*;

/// Expect engineers to get summary totals for their assigned works only
#[tokio::test]
async fn summary_scoped_to_assigned_works() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let engineer = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
    let assigned = test.work().insert_work("Unit 100", None).await?;
    let other = test.work().insert_work("Unit 200", None).await?;
    test.work().assign_user(assigned.id, engineer.id).await?;
    let now = Utc::now().naive_utc();
    test.work()
        .insert_equipment(assigned.id, "V-001", Some((engineer.id, now)))
        .await?;
    test.work().insert_equipment(assigned.id, "V-002", None).await?;
    test.work().insert_equipment(other.id, "V-003", None).await?;

    let result = get_analytics_summary(State(test.app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: AnalyticsSummaryDto = body_json(resp).await;
    assert_eq!(summary.total_works, 1);
    assert_eq!(summary.total_equipment, 2);
    assert_eq!(summary.equipment_extracted, 1);
    assert_eq!(summary.success_rate, 50.0);

    Ok(())
}

/// Expect completion averaged across works for administrators
#[tokio::test]
async fn dashboard_metrics_for_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    test.work().insert_work("Unit 200", None).await?;
    let now = Utc::now().naive_utc();
    test.work()
        .insert_equipment(work.id, "V-001", Some((admin.id, now)))
        .await?;

    let result = get_dashboard_metrics(State(test.app_state()), test.session.clone()).await;

    let metrics: DashboardMetricsDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(metrics.total_equipment, 1);
    assert_eq!(metrics.equipment_extracted, 1);
    assert_eq!(metrics.work_completion, 50);

    Ok(())
}

/// Expect the newest entries first and the limit respected
#[tokio::test]
async fn recent_activity_respects_limit() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    let now = Utc::now().naive_utc();
    for (minutes, action) in [(30, "work_created"), (20, "work_assigned"), (10, "status_changed")] {
        test.work()
            .insert_history(work.id, admin.id, action, now - Duration::minutes(minutes))
            .await?;
    }

    let result = get_recent_activity(
        State(test.app_state()),
        test.session.clone(),
        Query(ActivityQuery { limit: Some(2) }),
    )
    .await;

    let activity: Vec<ActivityItemDto> = body_json(result.unwrap().into_response()).await;
    let actions: Vec<&str> = activity.iter().map(|a| a.action_type.as_str()).collect();
    assert_eq!(actions, vec!["status_changed", "work_assigned"]);

    Ok(())
}

/// Expect 403 for engineers on every administrator analytics endpoint
#[tokio::test]
async fn admin_analytics_require_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let engineer = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    let state = test.app_state();

    let statuses = [
        get_user_performance(
            State(state.clone()),
            test.session.clone(),
            Path(engineer.id),
            Query(PeriodQuery::default()),
        )
        .await
        .into_response()
        .status(),
        get_team_comparison(
            State(state.clone()),
            test.session.clone(),
            Query(PeriodQuery::default()),
        )
        .await
        .into_response()
        .status(),
        get_work_timeline(State(state.clone()), test.session.clone(), Path(work.id))
            .await
            .into_response()
            .status(),
        get_productivity_insights(
            State(state),
            test.session.clone(),
            Query(PeriodQuery::default()),
        )
        .await
        .into_response()
        .status(),
    ];

    assert!(statuses.iter().all(|s| *s == StatusCode::FORBIDDEN));

    Ok(())
}

/// Expect an engineer's activity summarized for administrators
#[tokio::test]
async fn user_performance_for_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;
    let engineer = test
        .user()
        .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    let now = Utc::now().naive_utc();
    test.work()
        .insert_history(work.id, engineer.id, "equipment_extracted", now - Duration::hours(1))
        .await?;
    test.work()
        .insert_history(work.id, engineer.id, "data_corrected", now - Duration::minutes(30))
        .await?;

    let result = get_user_performance(
        State(test.app_state()),
        test.session.clone(),
        Path(engineer.id),
        Query(PeriodQuery {
            period: Some("all".to_string()),
            user_id: None,
        }),
    )
    .await;

    let summary: UserPerformanceSummaryDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(summary.user_id, engineer.id);
    assert_eq!(summary.period, "all");
    assert_eq!(summary.total_actions, 2);
    assert_eq!(summary.works_involved, 1);

    Ok(())
}

/// Expect 404 for a performance summary of an unknown user
#[tokio::test]
async fn user_performance_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = get_user_performance(
        State(test.app_state()),
        test.session.clone(),
        Path(404),
        Query(PeriodQuery::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect every active engineer in the team comparison
#[tokio::test]
async fn team_comparison_lists_engineers() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_user("alice", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .with_user("bob", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .build()
        .await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = get_team_comparison(
        State(test.app_state()),
        test.session.clone(),
        Query(PeriodQuery {
            period: Some("all".to_string()),
            user_id: None,
        }),
    )
    .await;

    let comparison: TeamComparisonDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(comparison.data.len(), 2);
    assert_eq!(comparison.summary.total_engineers, 2);

    Ok(())
}

/// Expect 404 for the timeline of an unknown work
#[tokio::test]
async fn work_timeline_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = get_work_timeline(
        State(test.app_state()),
        test.session.clone(),
        Path(404),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect productivity insights without activity to have no peak hours
#[tokio::test]
async fn productivity_insights_without_activity() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = get_productivity_insights(
        State(test.app_state()),
        test.session.clone(),
        Query(PeriodQuery::default()),
    )
    .await;

    let insights: ProductivityInsightsDto = body_json(result.unwrap().into_response()).await;
    assert!(insights.hourly_productivity.is_empty());
    assert!(insights.peak_hours.is_none());
    assert_eq!(insights.insights.total_days_active, 0);

    Ok(())
}
