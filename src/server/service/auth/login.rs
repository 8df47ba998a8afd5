use sea_orm::DatabaseConnection;

use crate::{
    model::user::{LoginDto, RegisterDto, UserDto, UserStatus},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        service::{
            auth::password::verify_password,
            user::{user_dto, UserService},
            validation::normalize_user_status,
        },
    },
};

/// Service for account registration and login
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of AuthService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new engineer account
    pub async fn register(&self, registration: RegisterDto) -> Result<UserDto, Error> {
        let user_service = UserService::new(self.db);

        user_service
            .register_engineer(
                registration.username,
                registration.full_name,
                registration.password,
                registration.email,
            )
            .await
    }

    /// Checks credentials and returns the account on success
    ///
    /// Checks run in a fixed order: the account must exist, be active and the password must
    /// match.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Login successful
    /// - `Err(Error::AuthError(AuthError::UserNotFound))` - No account with that username
    /// - `Err(Error::AuthError(AuthError::AccountInactive))` - The account is deactivated
    /// - `Err(Error::AuthError(AuthError::InvalidPassword))` - Wrong password
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn login(&self, credentials: &LoginDto) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .get_by_username(credentials.username.trim())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if normalize_user_status(&user.status) != Some(UserStatus::Active) {
            return Err(AuthError::AccountInactive.into());
        }

        if !verify_password(&credentials.password, &user.password) {
            tracing::debug!(user_id = %user.id, "Login attempt with invalid password");

            return Err(AuthError::InvalidPassword.into());
        }

        tracing::info!(user_id = %user.id, "User {} logged in", user.username);

        user_dto(user)
    }
}
