use autorbi::{
    model::user::{LoginDto, LoginResponseDto},
    server::{controller::auth::login, model::session::user::SessionUserId},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::util::TEST_PASSWORD;

use super::*;

fn credentials(username: &str, password: &str) -> LoginDto {
    LoginDto {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Expect 200 and the user ID stored in session for valid credentials
#[tokio::test]
async fn logs_in_active_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test
        .insert_user_with_password("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(credentials("engineer", TEST_PASSWORD)),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: LoginResponseDto = body_json(resp).await;
    assert_eq!(body.user.id, user.id);

    let session_user_id = SessionUserId::get(&test.session).await.unwrap();
    assert_eq!(session_user_id, Some(user.id));

    Ok(())
}

/// Expect 401 for a wrong password without touching the session
#[tokio::test]
async fn rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.insert_user_with_password("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(credentials("engineer", "WrongPassword1!")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 401 for an unknown username
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(credentials("nobody", TEST_PASSWORD)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 403 for an inactive account even with the right password
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.insert_user_with_password(
        "engineer",
        constant::ROLE_ENGINEER,
        constant::STATUS_INACTIVE,
    )
    .await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(credentials("engineer", TEST_PASSWORD)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 500 when the user table does not exist
#[tokio::test]
async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(credentials("engineer", TEST_PASSWORD)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
