//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, the router tests go through the full
//! axum service with the session layer.

mod admin;
mod analytics;
mod auth;
mod equipment;
mod router;
mod user;
mod work;

use autorbi_test_utils::prelude::*;

use crate::util::{body_json, TestContextExt};
