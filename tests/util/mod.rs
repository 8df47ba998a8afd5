//! Shared helpers for the integration tests

use autorbi::server::{
    model::{app::AppState, session::user::SessionUserId},
    service::auth::password::hash_password,
};
use autorbi_test_utils::prelude::*;
use axum::response::Response;
use serde::de::DeserializeOwned;

pub static TEST_PASSWORD: &str = "Password123!";

/// Extension trait for TestContext to build the server's AppState
pub(crate) trait TestContextExt {
    fn app_state(&self) -> AppState;

    /// Inserts a user whose password is [`TEST_PASSWORD`]
    async fn insert_user_with_password(
        &self,
        username: &str,
        role: &str,
        status: &str,
    ) -> Result<entity::user::Model, TestError>;

    /// Inserts a user and stores their ID in the test session
    async fn login_as(
        &self,
        username: &str,
        role: &str,
    ) -> Result<entity::user::Model, TestError>;
}

impl TestContextExt for TestContext {
    fn app_state(&self) -> AppState {
        self.to_app_state()
    }

    async fn insert_user_with_password(
        &self,
        username: &str,
        role: &str,
        status: &str,
    ) -> Result<entity::user::Model, TestError> {
        let password_hash = hash_password(TEST_PASSWORD).unwrap();

        self.user()
            .insert_user_with_password_hash(username, &password_hash, role, status)
            .await
    }

    async fn login_as(
        &self,
        username: &str,
        role: &str,
    ) -> Result<entity::user::Model, TestError> {
        let user = self
            .user()
            .insert_user(username, role, constant::STATUS_ACTIVE)
            .await?;
        SessionUserId::insert(&self.session, user.id).await.unwrap();

        Ok(user)
    }
}

/// Reads a JSON response body
pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
