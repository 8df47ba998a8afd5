use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{AdminUpdateUserDto, CreateUserDto, UserDto, UserListDto, UserListQuery},
    },
    server::{
        controller::util::get_user::get_admin_from_session,
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static ADMIN_TAG: &str = "admin";

fn user_not_found(user_id: i32) -> Error {
    Error::NotFound(format!("User with ID {} not found", user_id))
}

/// Lists accounts with optional status, role and search filters
///
/// Pages past the end are clamped to the last page.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(UserListQuery),
    responses(
        (status = 200, description = "A page of users", body = UserListDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;
    let user_service = UserService::new(&state.db);

    let users = user_service.list_users(query).await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Creates an account with any role
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Json(user): Json<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;
    let user_service = UserService::new(&state.db);

    let created = user_service.create_user(user).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially updates an account
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Account ID")),
    request_body = AdminUpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = UserDto),
        (status = 400, description = "Validation failed or own role/status changed", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(update): Json<AdminUpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;
    let user_service = UserService::new(&state.db);

    let updated = user_service
        .admin_update_user(admin.id, user_id, update)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(updated)))
}

/// Flips an account between active and inactive
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/toggle-status",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Status changed", body = UserDto),
        (status = 400, description = "Cannot change your own status", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_user_status(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;
    let user_service = UserService::new(&state.db);

    let updated = user_service
        .toggle_user_status(admin.id, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(updated)))
}

/// Deactivates an account, accounts are never removed
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deactivated", body = UserDto),
        (status = 400, description = "Cannot deactivate your own account", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;
    let user_service = UserService::new(&state.db);

    let updated = user_service
        .deactivate_user(admin.id, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(updated)))
}
