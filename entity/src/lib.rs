//! SeaORM entities for the AutoRBI schema.

pub mod prelude;

pub mod assign_work;
pub mod component;
pub mod correction_log;
pub mod equipment;
pub mod user;
pub mod work;
pub mod work_history;
