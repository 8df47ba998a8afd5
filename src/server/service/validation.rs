//! Input rules for accounts.
//!
//! Each validator reports only the first rule that fails, checked in a fixed order, so the
//! client always sees the most basic problem first.

use crate::{
    model::user::{UserRole, UserStatus},
    server::error::validation::ValidationError,
};

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;
pub const FULL_NAME_MAX_LENGTH: usize = 100;

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let length = username.chars().count();

    let message = if username.is_empty() {
        "Username is required".to_string()
    } else if length < USERNAME_MIN_LENGTH {
        format!("Username must be at least {} characters", USERNAME_MIN_LENGTH)
    } else if length > USERNAME_MAX_LENGTH {
        format!("Username must be at most {} characters", USERNAME_MAX_LENGTH)
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        "Username can only contain letters, numbers, underscore, and hyphen".to_string()
    } else {
        return Ok(());
    };

    Err(ValidationError::Username(message))
}

/// Special characters are allowed but not required
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();

    let message = if password.is_empty() {
        "Password is required".to_string()
    } else if length < PASSWORD_MIN_LENGTH {
        format!("Password must be at least {} characters", PASSWORD_MIN_LENGTH)
    } else if length > PASSWORD_MAX_LENGTH {
        format!("Password must be at most {} characters", PASSWORD_MAX_LENGTH)
    } else if !password.chars().any(char::is_uppercase) {
        "Password must contain at least one uppercase letter".to_string()
    } else if !password.chars().any(char::is_lowercase) {
        "Password must contain at least one lowercase letter".to_string()
    } else if !password.chars().any(char::is_numeric) {
        "Password must contain at least one digit".to_string()
    } else {
        return Ok(());
    };

    Err(ValidationError::Password(message))
}

pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    let full_name = full_name.trim();

    if full_name.is_empty() {
        return Err(ValidationError::FullName(
            "Full name is required".to_string(),
        ));
    }

    if full_name.chars().count() > FULL_NAME_MAX_LENGTH {
        return Err(ValidationError::FullName(format!(
            "Full name must be at most {} characters",
            FULL_NAME_MAX_LENGTH
        )));
    }

    Ok(())
}

/// Maps the many spellings of a status the admin UI accepts onto the canonical value
///
/// Returns `None` for anything unrecognized.
pub fn normalize_user_status(value: &str) -> Option<UserStatus> {
    match value.trim().to_lowercase().as_str() {
        "active" | "a" | "enabled" | "yes" | "true" | "1" => Some(UserStatus::Active),
        "inactive" | "i" | "disabled" | "no" | "false" | "0" => Some(UserStatus::Inactive),
        _ => None,
    }
}

/// Like [`normalize_user_status`] but fails with a validation error for unknown values
pub fn parse_user_status(value: &str) -> Result<UserStatus, ValidationError> {
    normalize_user_status(value).ok_or_else(|| ValidationError::InvalidStatus(value.to_string()))
}

/// Parses a role from client input, ignoring case and surrounding whitespace
pub fn parse_user_role(value: &str) -> Result<UserRole, ValidationError> {
    match value.trim().to_lowercase().as_str() {
        "admin" => Ok(UserRole::Admin),
        "engineer" => Ok(UserRole::Engineer),
        _ => Err(ValidationError::InvalidRole(value.to_string())),
    }
}
