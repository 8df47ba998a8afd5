//! Data transfer objects shared by the HTTP API.

pub mod analytics;
pub mod api;
pub mod user;
pub mod work;
