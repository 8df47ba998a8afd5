//! Database fixtures inserted directly through the entity crate.

pub mod user;
pub mod work;
