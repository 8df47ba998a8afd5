//! Service layer for business logic.
//!
//! Services sit between the controllers and the repositories. They enforce permissions,
//! validate input, write work history and aggregate analytics. Pure rules such as password
//! and username validation or correction counting are plain functions.

pub mod analytics;
pub mod auth;
pub mod correction;
pub mod excel;
pub mod file;
pub mod user;
pub mod validation;
pub mod work;
