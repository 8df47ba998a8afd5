pub use super::assign_work::Entity as AssignWork;
pub use super::component::Entity as Component;
pub use super::correction_log::Entity as CorrectionLog;
pub use super::equipment::Entity as Equipment;
pub use super::user::Entity as User;
pub use super::work::Entity as Work;
pub use super::work_history::Entity as WorkHistory;
