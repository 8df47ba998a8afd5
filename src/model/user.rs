use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Role of an AutoRBI account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Admin,
    #[default]
    Engineer,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Engineer => "Engineer",
        }
    }

    /// Parses the role exactly as stored in the database
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Engineer" => Some(Self::Engineer),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status, inactive accounts cannot log in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: NaiveDateTime,
}

/// Self-registration payload, the resulting account is always an engineer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub message: String,
    pub user: UserDto,
}

/// Account creation by an administrator
///
/// `role` is matched case-insensitively and defaults to `Engineer` when missing or blank.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Partial account update by an administrator
///
/// `status` is free text and is normalized, so `"yes"`, `"enabled"` or `"1"` all activate
/// the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdminUpdateUserDto {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
}

/// Profile update by the logged in user
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub full_name: Option<String>,
    pub password: Option<String>,
}

/// Filters for the user management list
///
/// Blank filters are ignored, `status` accepts the same spellings as [`AdminUpdateUserDto`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub status: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    /// 1-based index of the first user on this page, 0 when the list is empty
    pub start: u64,
    /// 1-based index of the last user on this page
    pub end: u64,
    pub has_previous: bool,
    pub has_next: bool,
}
