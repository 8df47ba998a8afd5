//! Utility functions for controller request handling.
//!
//! Session user retrieval and role checks shared by the protected endpoints.

pub mod get_user;
