//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries for one table each and are generic over
//! [`sea_orm::ConnectionTrait`], so services can run them against a connection or inside a
//! transaction.

pub mod component;
pub mod correction_log;
pub mod equipment;
pub mod user;
pub mod work;
pub mod work_history;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// Restricts a query on `column` to `start..=end`, either bound may be open.
pub(crate) fn within_range<E, C>(
    query: Select<E>,
    column: C,
    start: Option<chrono::NaiveDateTime>,
    end: Option<chrono::NaiveDateTime>,
) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let query = match start {
        Some(start) => query.filter(column.gte(start)),
        None => query,
    };

    match end {
        Some(end) => query.filter(column.lte(end)),
        None => query,
    }
}
