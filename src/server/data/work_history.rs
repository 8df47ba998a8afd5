use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::within_range;

pub struct WorkHistoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkHistoryRepository<'a, C> {
    /// Creates a new instance of [`WorkHistoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an entry timestamped now
    pub async fn create(
        &self,
        work_id: i32,
        user_id: i32,
        action_type: &str,
        description: Option<&str>,
    ) -> Result<entity::work_history::Model, DbErr> {
        let entry = entity::work_history::ActiveModel {
            work_id: ActiveValue::Set(work_id),
            user_id: ActiveValue::Set(user_id),
            action_type: ActiveValue::Set(action_type.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            timestamp: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entry.insert(self.db).await
    }

    /// Returns a work's history, oldest first
    pub async fn get_by_work(
        &self,
        work_id: i32,
    ) -> Result<Vec<entity::work_history::Model>, DbErr> {
        entity::prelude::WorkHistory::find()
            .filter(entity::work_history::Column::WorkId.eq(work_id))
            .order_by_asc(entity::work_history::Column::Timestamp)
            .order_by_asc(entity::work_history::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns a work's history together with the acting users, oldest first
    pub async fn get_by_work_with_users(
        &self,
        work_id: i32,
    ) -> Result<Vec<(entity::work_history::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::WorkHistory::find()
            .find_also_related(entity::user::Entity)
            .filter(entity::work_history::Column::WorkId.eq(work_id))
            .order_by_asc(entity::work_history::Column::Timestamp)
            .order_by_asc(entity::work_history::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns a user's history entries in the optional time range, oldest first
    pub async fn get_by_user(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::work_history::Model>, DbErr> {
        let query = entity::prelude::WorkHistory::find()
            .filter(entity::work_history::Column::UserId.eq(user_id));

        within_range(query, entity::work_history::Column::Timestamp, start, end)
            .order_by_asc(entity::work_history::Column::Timestamp)
            .order_by_asc(entity::work_history::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns history entries of all listed users in the optional time range, oldest first
    pub async fn get_by_users(
        &self,
        user_ids: &[i32],
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::work_history::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = entity::prelude::WorkHistory::find()
            .filter(entity::work_history::Column::UserId.is_in(user_ids.iter().copied()));

        within_range(query, entity::work_history::Column::Timestamp, start, end)
            .order_by_asc(entity::work_history::Column::Timestamp)
            .order_by_asc(entity::work_history::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns all history entries in the optional time range, oldest first
    pub async fn get_in_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<entity::work_history::Model>, DbErr> {
        within_range(
            entity::prelude::WorkHistory::find(),
            entity::work_history::Column::Timestamp,
            start,
            end,
        )
        .order_by_asc(entity::work_history::Column::Timestamp)
        .order_by_asc(entity::work_history::Column::Id)
        .all(self.db)
        .await
    }

    /// Returns the newest entries with their users
    ///
    /// When `work_ids` is provided only entries of those works are returned.
    pub async fn get_recent(
        &self,
        limit: u64,
        work_ids: Option<&[i32]>,
    ) -> Result<Vec<(entity::work_history::Model, Option<entity::user::Model>)>, DbErr> {
        let mut query = entity::prelude::WorkHistory::find().find_also_related(entity::user::Entity);

        if let Some(work_ids) = work_ids {
            if work_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(
                entity::work_history::Column::WorkId.is_in(work_ids.iter().copied()),
            );
        }

        query
            .order_by_desc(entity::work_history::Column::Timestamp)
            .order_by_desc(entity::work_history::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}
