//! Shared test setup for the AutoRBI workspace.
//!
//! Tests declare the tables and fixtures they need with [`TestBuilder`] and receive a
//! [`TestContext`] holding an in-memory SQLite database, a session backed by an in-memory
//! store and a temporary output directory for Excel files.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{constant, TestBuilder, TestContext, TestError};
}
