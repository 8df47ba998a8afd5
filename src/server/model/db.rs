//! Database model type aliases.
//!
//! Convenient aliases for SeaORM entity models so the rest of the server does not need to
//! spell out the `entity` crate paths.

/// An AutoRBI account.
///
/// # Fields (from `entity::user::Model`)
/// - `id` - Primary key
/// - `username` - Unique login name
/// - `full_name` - Display name
/// - `email` - Optional contact address
/// - `password` - Argon2 PHC hash string
/// - `role` - `Admin` or `Engineer`
/// - `status` - `Active` or `Inactive`
/// - `created_at` - Timestamp when the account was created
pub type UserModel = entity::user::Model;

/// A unit of inspection-report generation.
pub type WorkModel = entity::work::Model;

/// Assignment of an engineer to a work.
pub type AssignWorkModel = entity::assign_work::Model;

/// An inspected asset belonging to a work.
///
/// `extracted_by` and `extracted_date` are set once data has been extracted from the
/// equipment's drawing.
pub type EquipmentModel = entity::equipment::Model;

/// A sub-part of an equipment with its process and material fields.
pub type ComponentModel = entity::component::Model;

/// A single logged action on a work.
pub type WorkHistoryModel = entity::work_history::Model;

/// A record of how many blank component fields a user filled in.
pub type CorrectionLogModel = entity::correction_log::Model;
