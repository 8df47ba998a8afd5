use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::api::ErrorType, server::error::error_response};

/// Input rejected by a validation rule, the message is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Username(String),
    #[error("{0}")]
    Password(String),
    #[error("{0}")]
    FullName(String),
    #[error("Invalid user status: {0}")]
    InvalidStatus(String),
    #[error("Invalid user role: {0}")]
    InvalidRole(String),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Work name is required")]
    WorkNameRequired,
    #[error("Equipment number is required")]
    EquipmentNoRequired,
    #[error("Equipment {0} already exists in this work")]
    DuplicateEquipment(String),
    #[error("User {0} is not an active engineer")]
    NotAnEngineer(i32),
    #[error("User {user_id} is already assigned to work {work_id}")]
    AlreadyAssigned { work_id: i32, user_id: i32 },
    #[error("Fields corrected ({fields_corrected}) cannot exceed total fields ({total_fields})")]
    CorrectionExceedsTotal {
        fields_corrected: i32,
        total_fields: i32,
    },
    #[error("Component {component_id} does not belong to equipment {equipment_id}")]
    ComponentMismatch {
        component_id: i32,
        equipment_id: i32,
    },
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Validation failed: {}", self);

        error_response(StatusCode::BAD_REQUEST, ErrorType::Validation, self.to_string())
    }
}
