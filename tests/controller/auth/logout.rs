use autorbi::server::{controller::auth::logout, model::session::user::SessionUserId};
use axum::{http::StatusCode, response::IntoResponse};

use super::*;

/// Expect 200 and the user removed from session
#[tokio::test]
async fn clears_session_on_logout() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let result = logout(test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 200 when logging out without a session
#[tokio::test]
async fn succeeds_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = logout(test.session).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
