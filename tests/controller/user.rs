use autorbi::{
    model::user::{UpdateProfileDto, UserDto},
    server::controller::user::update_profile,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::*;

/// Expect 200 with the updated full name
#[tokio::test]
async fn updates_own_full_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test.login_as("engineer", constant::ROLE_ENGINEER).await?;

    let result = update_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(UpdateProfileDto {
            full_name: Some("Renamed Engineer".to_string()),
            password: None,
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: UserDto = body_json(resp).await;
    assert_eq!(body.id, user.id);
    assert_eq!(body.full_name, "Renamed Engineer");

    Ok(())
}

/// Expect 400 for a weak new password
#[tokio::test]
async fn rejects_weak_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("engineer", constant::ROLE_ENGINEER).await?;

    let result = update_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(UpdateProfileDto {
            full_name: None,
            password: Some("weak".to_string()),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 401 without a logged in user
#[tokio::test]
async fn requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let result = update_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(UpdateProfileDto::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
