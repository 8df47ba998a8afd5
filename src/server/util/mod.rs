//! Utility functions and helpers for server operations.
//!
//! Pagination arithmetic for list endpoints and time formatting for the activity feed.

pub mod pagination;
pub mod time;
