use autorbi::{
    model::{
        api::{ErrorDto, ErrorType},
        user::{
            AdminUpdateUserDto, CreateUserDto, UserDto, UserListDto, UserListQuery, UserRole,
            UserStatus,
        },
    },
    server::controller::admin::{
        create_user, deactivate_user, list_users, toggle_user_status, update_user,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::*;

/// Expect 403 when an engineer requests the account list
#[tokio::test]
async fn list_users_requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("engineer", constant::ROLE_ENGINEER).await?;

    let result = list_users(
        State(test.app_state()),
        test.session.clone(),
        Query(UserListQuery::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 200 with the filtered account list
#[tokio::test]
async fn list_users_filters_by_role() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_user("alice", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .with_user("bob", constant::ROLE_ENGINEER, constant::STATUS_INACTIVE)
        .build()
        .await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = list_users(
        State(test.app_state()),
        test.session.clone(),
        Query(UserListQuery {
            role: Some("engineer".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let list: UserListDto = body_json(resp).await;
    assert_eq!(list.total, 2);
    assert!(list.users.iter().all(|u| u.role == UserRole::Engineer));

    Ok(())
}

/// Expect 201 with the requested role
#[tokio::test]
async fn create_user_with_admin_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = create_user(
        State(test.app_state()),
        test.session.clone(),
        Json(CreateUserDto {
            username: "second_admin".to_string(),
            full_name: "Second Admin".to_string(),
            password: "Password123!".to_string(),
            email: None,
            role: Some("Admin".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: UserDto = body_json(resp).await;
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(user.status, UserStatus::Active);

    Ok(())
}

/// Expect 404 when updating an account that does not exist
#[tokio::test]
async fn update_user_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = update_user(
        State(test.app_state()),
        test.session.clone(),
        Path(999),
        Json(AdminUpdateUserDto {
            full_name: Some("Nobody".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the free text status to be normalized on update
#[tokio::test]
async fn update_user_normalizes_status() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;
    let engineer = test
        .user()
        .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_INACTIVE)
        .await?;

    let result = update_user(
        State(test.app_state()),
        test.session.clone(),
        Path(engineer.id),
        Json(AdminUpdateUserDto {
            status: Some("enabled".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: UserDto = body_json(resp).await;
    assert_eq!(user.status, UserStatus::Active);

    Ok(())
}

/// Expect toggling flips another account's status
#[tokio::test]
async fn toggle_user_status_flips_status() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;
    let engineer = test
        .user()
        .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;

    let result = toggle_user_status(
        State(test.app_state()),
        test.session.clone(),
        Path(engineer.id),
    )
    .await;

    let resp = result.unwrap().into_response();
    let user: UserDto = body_json(resp).await;
    assert_eq!(user.status, UserStatus::Inactive);

    Ok(())
}

/// Expect 400 when an administrator toggles their own account
#[tokio::test]
async fn toggle_user_status_refuses_self() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = toggle_user_status(
        State(test.app_state()),
        test.session.clone(),
        Path(admin.id),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect deactivation to keep the account but mark it inactive
#[tokio::test]
async fn deactivate_user_marks_inactive() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;
    let engineer = test
        .user()
        .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;

    let result = deactivate_user(
        State(test.app_state()),
        test.session.clone(),
        Path(engineer.id),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: UserDto = body_json(resp).await;
    assert_eq!(user.id, engineer.id);
    assert_eq!(user.status, UserStatus::Inactive);

    Ok(())
}

/// Expect 400 with a JSON error body for an unknown role
#[tokio::test]
async fn create_user_rejects_unknown_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = create_user(
        State(test.app_state()),
        test.session.clone(),
        Json(CreateUserDto {
            username: "manager".to_string(),
            full_name: "Some Manager".to_string(),
            password: "Password123!".to_string(),
            email: None,
            role: Some("Manager".to_string()),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error_type, ErrorType::Validation);
    assert_eq!(error.error, "Invalid user role: Manager");

    Ok(())
}

/// Expect lowercase status filters to be accepted
#[tokio::test]
async fn list_users_accepts_lowercase_status() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_user("alice", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .with_user("bob", constant::ROLE_ENGINEER, constant::STATUS_INACTIVE)
        .build()
        .await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = list_users(
        State(test.app_state()),
        test.session.clone(),
        Query(UserListQuery {
            status: Some("inactive".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let list: UserListDto = body_json(resp).await;
    assert_eq!(list.total, 1);
    assert_eq!(list.users[0].username, "bob");

    Ok(())
}

/// Expect 400 when an administrator demotes their own account
#[tokio::test]
async fn update_user_refuses_own_role_change() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = update_user(
        State(test.app_state()),
        test.session.clone(),
        Path(admin.id),
        Json(AdminUpdateUserDto {
            role: Some("Engineer".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error_type, ErrorType::Validation);

    Ok(())
}
