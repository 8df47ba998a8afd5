//! AutoRBI: equipment records, correction tracking and analytics for Risk-Based Inspection work.
//!
//! `model` holds the JSON data transfer objects exchanged over the HTTP API, `server` holds
//! configuration, persistence, business logic and the axum routes.

pub mod model;
pub mod server;
