use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_FULL_NAME, TEST_PASSWORD_HASH},
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user with a placeholder password hash
    pub async fn insert_user(
        &self,
        username: &str,
        role: &str,
        status: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_user_with_password_hash(username, TEST_PASSWORD_HASH, role, status)
            .await
    }

    pub async fn insert_user_with_password_hash(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
        status: &str,
    ) -> Result<entity::user::Model, TestError> {
        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                username: ActiveValue::Set(username.to_string()),
                full_name: ActiveValue::Set(TEST_FULL_NAME.to_string()),
                email: ActiveValue::Set(Some(format!("{}@example.com", username))),
                password: ActiveValue::Set(password_hash.to_string()),
                role: ActiveValue::Set(role.to_string()),
                status: ActiveValue::Set(status.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
