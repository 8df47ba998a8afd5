use autorbi::{
    model::user::{LoginDto, UserDto},
    server::{config::Config, router, startup},
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::util::TEST_PASSWORD;

use super::*;

fn app(test: &TestContext) -> Router {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".parse().unwrap(),
        output_dir: test.output_dir.path().to_path_buf(),
        secure_cookies: false,
    };

    router::routes()
        .with_state(test.app_state())
        .layer(startup::session_layer(&config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Expect the OpenAPI document to describe the registered endpoints
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let resp = app(&test)
        .oneshot(get("/api/docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = body_json(resp).await;
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/auth/login"));
    assert!(paths.contains_key("/api/works/{work_id}/equipment"));
    assert!(paths.contains_key("/api/admin/analytics/team"));

    Ok(())
}

/// Expect 401 from a protected endpoint without a session cookie
#[tokio::test]
async fn rejects_request_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let resp = app(&test).oneshot(get("/api/works")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the session cookie from login to authenticate later requests
#[tokio::test]
async fn login_cookie_authenticates_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test
        .insert_user_with_password("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
        .await?;
    let app = app(&test);

    let credentials = LoginDto {
        username: "engineer".to_string(),
        password: TEST_PASSWORD.to_string(),
    };
    let login = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&credentials).unwrap()))
        .unwrap();

    let resp = app.clone().oneshot(login).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string();

    let request = Request::builder()
        .uri("/api/auth/user")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let current: UserDto = body_json(resp).await;
    assert_eq!(current.id, user.id);

    Ok(())
}
