/// Placeholder stored in the password column of fixture users.
///
/// It is not a valid PHC string, so password verification against it always fails.
pub static TEST_PASSWORD_HASH: &str = "not-a-password-hash";

pub static TEST_FULL_NAME: &str = "Test User";

pub static ROLE_ADMIN: &str = "Admin";
pub static ROLE_ENGINEER: &str = "Engineer";

pub static STATUS_ACTIVE: &str = "Active";
pub static STATUS_INACTIVE: &str = "Inactive";
