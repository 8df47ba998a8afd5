//! Tests for authentication controller endpoints.

mod get_user;
mod login;
mod logout;

use super::*;
