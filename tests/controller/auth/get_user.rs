use autorbi::{
    model::user::UserDto,
    server::{controller::auth::get_user, model::session::user::SessionUserId},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::*;

/// Expect 200 with the logged in user
#[tokio::test]
async fn returns_logged_in_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test.login_as("engineer", constant::ROLE_ENGINEER).await?;

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: UserDto = body_json(resp).await;
    assert_eq!(body.id, user.id);

    Ok(())
}

/// Expect 401 when nobody is logged in
#[tokio::test]
async fn returns_unauthorized_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 404 and a cleared session when the session user no longer exists
#[tokio::test]
async fn clears_session_for_missing_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    SessionUserId::insert(&test.session, 42).await.unwrap();

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 403 when the account was deactivated after login
#[tokio::test]
async fn rejects_deactivated_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test
        .user()
        .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_INACTIVE)
        .await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
