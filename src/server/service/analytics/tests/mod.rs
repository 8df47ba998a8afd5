use autorbi_test_utils::prelude::*;
use chrono::{Duration, NaiveDateTime, Utc};

use crate::{
    model::user::{UserDto, UserRole, UserStatus},
    server::model::db::UserModel,
};


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

/// A point in time `minutes` before now
fn minutes_ago(minutes: i64) -> NaiveDateTime {
    Utc::now().naive_utc() - Duration::minutes(minutes)
}
