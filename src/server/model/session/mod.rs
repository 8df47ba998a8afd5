//! Session data models and utilities.
//!
//! Type-safe wrappers for data kept in the tower-sessions store.

pub mod user;
