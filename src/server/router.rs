//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa path annotation. The
//! collected OpenAPI document is served at `/api/docs/openapi.json` and explored through
//! Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `/api/auth/*` - Registration, login, logout and the current user
/// - `/api/user/profile` - Self-service profile updates
/// - `/api/admin/users*` - Account management for administrators
/// - `/api/works*` - Works, assignments, equipment, reports, masterfile status and history
/// - `/api/equipment/{equipment_id}/corrections` - Component data corrections
/// - `/api/analytics/*` - Dashboard metrics and activity for every user
/// - `/api/admin/analytics/*` - Performance analytics for administrators
///
/// # Returns
/// An Axum `Router<AppState>` ready to be given state and the session layer.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, output_dir };
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "AutoRBI", description = "AutoRBI API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "Profile API routes"),
        (name = controller::admin::ADMIN_TAG, description = "Account management API routes"),
        (name = controller::work::WORK_TAG, description = "Work and equipment API routes"),
        (name = controller::equipment::EQUIPMENT_TAG, description = "Equipment correction API routes"),
        (name = controller::analytics::ANALYTICS_TAG, description = "Analytics API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::user::update_profile))
        .routes(routes!(
            controller::admin::list_users,
            controller::admin::create_user
        ))
        .routes(routes!(
            controller::admin::update_user,
            controller::admin::deactivate_user
        ))
        .routes(routes!(controller::admin::toggle_user_status))
        .routes(routes!(
            controller::work::list_works,
            controller::work::create_work
        ))
        .routes(routes!(controller::work::get_work))
        .routes(routes!(controller::work::assign_engineer))
        .routes(routes!(
            controller::work::get_work_equipment,
            controller::work::save_work_equipment
        ))
        .routes(routes!(controller::work::get_work_equipment_by_number))
        .routes(routes!(controller::work::update_work_reports))
        .routes(routes!(controller::work::get_work_excel))
        .routes(routes!(controller::work::can_upload_work_equipment))
        .routes(routes!(controller::work::get_work_history))
        .routes(routes!(controller::equipment::apply_corrections))
        .routes(routes!(controller::analytics::get_analytics_summary))
        .routes(routes!(controller::analytics::get_dashboard_metrics))
        .routes(routes!(controller::analytics::get_recent_activity))
        .routes(routes!(controller::analytics::get_user_performance))
        .routes(routes!(controller::analytics::get_team_comparison))
        .routes(routes!(controller::analytics::get_work_timeline))
        .routes(routes!(controller::analytics::get_productivity_insights))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
