use autorbi_test_utils::prelude::*;

use crate::{
    model::user::{UserDto, UserRole, UserStatus},
    server::model::db::UserModel,
};


/// Builds the session view of a fixture user
fn as_dto(user: &UserModel, role: UserRole) -> UserDto {
    UserDto {
        id: user.id,
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        role,
        status: UserStatus::Active,
        created_at: user.created_at,
    }
}
