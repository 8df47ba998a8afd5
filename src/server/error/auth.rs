use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    model::api::ErrorType,
    server::error::{error_response, InternalServerError},
};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("User not found")]
    UserNotFound,
    #[error("Account inactive")]
    AccountInactive,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("{0}")]
    AdminRequired(String),
    #[error("You are not assigned to work {0}")]
    WorkNotAssigned(i32),
    #[error("You cannot change the status of your own account")]
    CannotModifySelf,
    #[error("User ID {0} has an unrecognized role stored")]
    InvalidStoredRole(i32),
}

impl AuthError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::UserNotInDatabase(_) => ErrorType::NotFound,
            Self::CannotModifySelf => ErrorType::Validation,
            Self::InvalidStoredRole(_) => ErrorType::SystemError,
            _ => ErrorType::Unauthorized,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error_type = self.error_type();

        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", Self::UserNotInSession);

                error_response(StatusCode::UNAUTHORIZED, error_type, "Not logged in")
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(
                    user_id = %user_id,
                    "{}",
                    self
                );

                error_response(StatusCode::NOT_FOUND, error_type, "User not found")
            }
            Self::UserNotFound | Self::InvalidPassword => {
                error_response(StatusCode::UNAUTHORIZED, error_type, self.to_string())
            }
            Self::AccountInactive | Self::AdminRequired(_) | Self::WorkNotAssigned(_) => {
                tracing::warn!("Unauthorized access attempt: {}", self);

                error_response(StatusCode::FORBIDDEN, error_type, self.to_string())
            }
            Self::CannotModifySelf => {
                error_response(StatusCode::BAD_REQUEST, error_type, self.to_string())
            }
            Self::InvalidStoredRole(_) => InternalServerError(self).into_response(),
        }
    }
}
