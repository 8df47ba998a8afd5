pub use sea_orm_migration::prelude::*;

mod m20251101_000001_users;
mod m20251101_000002_work;
mod m20251101_000003_assign_work;
mod m20251101_000004_equipment;
mod m20251101_000005_component;
mod m20251101_000006_work_history;
mod m20251101_000007_correction_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_users::Migration),
            Box::new(m20251101_000002_work::Migration),
            Box::new(m20251101_000003_assign_work::Migration),
            Box::new(m20251101_000004_equipment::Migration),
            Box::new(m20251101_000005_component::Migration),
            Box::new(m20251101_000006_work_history::Migration),
            Box::new(m20251101_000007_correction_log::Migration),
        ]
    }
}
