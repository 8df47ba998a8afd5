//! HTTP controller endpoints for the AutoRBI web API.
//!
//! Axum handlers for authentication, account management, works, equipment corrections and
//! analytics. Controllers read the logged in user from the tower-sessions session, call the
//! services and return JSON responses. Every handler is annotated for utoipa so it appears in
//! the OpenAPI document.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod equipment;
pub mod user;
pub mod util;
pub mod work;
