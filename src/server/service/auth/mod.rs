//! Authentication service layer.
//!
//! Password hashing with argon2 plus the register and login flows.

pub mod login;
pub mod password;
