//! Error types for the AutoRBI server.
//!
//! Domain errors (authentication, configuration, validation) live in their own modules and
//! are aggregated by [`Error`]. Every error converts into an HTTP response carrying an
//! [`ErrorDto`] whose `error_type` is one of `unauthorized`, `validation`, `not_found` or
//! `system_error`.

pub mod auth;
pub mod config;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ErrorDto, ErrorType},
    server::error::{auth::AuthError, config::ConfigError, validation::ValidationError},
};

/// Main error type for the AutoRBI server.
///
/// Uses `thiserror`'s `#[from]` attribute so the `?` operator converts library and domain
/// errors automatically. The `IntoResponse` implementation maps errors to HTTP responses.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Input failed a validation rule.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHashError(String),
    /// Internal error indicating a bug, such as a stored value outside its allowed set.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Excel workbook could not be opened or read.
    #[error(transparent)]
    ExcelError(#[from] calamine::Error),
    /// Filesystem error.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Category reported to API clients.
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::AuthError(err) => err.error_type(),
            Self::ValidationError(_) => ErrorType::Validation,
            Self::NotFound(_) => ErrorType::NotFound,
            _ => ErrorType::SystemError,
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures
/// - 401/403 - Authentication and authorization failures
/// - 404 Not Found - Missing users, works or equipment
/// - 500 Internal Server Error - Everything else (logged, with a generic message)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                error_response(StatusCode::NOT_FOUND, ErrorType::NotFound, message)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response.
pub fn error_response(
    status: StatusCode,
    error_type: ErrorType,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
            error_type,
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::SystemError,
            "Internal server error",
        )
    }
}
