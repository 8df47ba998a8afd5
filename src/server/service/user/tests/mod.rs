use autorbi_test_utils::prelude::*;

use crate::model::user::{CreateUserDto, UserRole};


const PASSWORD: &str = "Secret123";

fn create_dto(username: &str, role: UserRole) -> CreateUserDto {
    CreateUserDto {
        username: username.to_string(),
        full_name: "Jane Engineer".to_string(),
        password: PASSWORD.to_string(),
        email: Some(format!("{}@example.com", username)),
        role: Some(role.as_str().to_string()),
    }
}
