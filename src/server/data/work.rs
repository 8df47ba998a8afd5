use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Report paths and status recorded on a work, `None` leaves the column unchanged
#[derive(Debug, Default)]
pub struct WorkReportChanges {
    pub excel_path: Option<String>,
    pub ppt_path: Option<String>,
    pub status: Option<String>,
}

pub struct WorkRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkRepository<'a, C> {
    /// Creates a new instance of [`WorkRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new work in the given status
    pub async fn create(
        &self,
        work_name: &str,
        description: Option<&str>,
        status: &str,
        created_by: Option<i32>,
    ) -> Result<entity::work::Model, DbErr> {
        let work = entity::work::ActiveModel {
            work_name: ActiveValue::Set(work_name.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            status: ActiveValue::Set(status.to_string()),
            excel_path: ActiveValue::Set(None),
            ppt_path: ActiveValue::Set(None),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        work.insert(self.db).await
    }

    pub async fn get_by_id(&self, work_id: i32) -> Result<Option<entity::work::Model>, DbErr> {
        entity::prelude::Work::find_by_id(work_id).one(self.db).await
    }

    /// Returns every work, newest first
    pub async fn get_all(&self) -> Result<Vec<entity::work::Model>, DbErr> {
        entity::prelude::Work::find()
            .order_by_desc(entity::work::Column::CreatedAt)
            .order_by_desc(entity::work::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns the works assigned to a user, newest first
    pub async fn get_assigned_to_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::work::Model>, DbErr> {
        entity::prelude::Work::find()
            .inner_join(entity::assign_work::Entity)
            .filter(entity::assign_work::Column::UserId.eq(user_id))
            .order_by_desc(entity::work::Column::CreatedAt)
            .order_by_desc(entity::work::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns the IDs of works assigned to a user
    pub async fn get_assigned_work_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::AssignWork::find()
            .select_only()
            .column(entity::assign_work::Column::WorkId)
            .filter(entity::assign_work::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Updates report paths and status, returns `Ok(None)` if the work does not exist
    pub async fn update_reports(
        &self,
        work_id: i32,
        changes: WorkReportChanges,
    ) -> Result<Option<entity::work::Model>, DbErr> {
        let work = match entity::prelude::Work::find_by_id(work_id)
            .one(self.db)
            .await?
        {
            Some(work) => work,
            None => return Ok(None),
        };

        let unchanged = work.clone();
        let mut work_am = work.into_active_model();
        if let Some(excel_path) = changes.excel_path {
            work_am.excel_path = ActiveValue::Set(Some(excel_path));
        }
        if let Some(ppt_path) = changes.ppt_path {
            work_am.ppt_path = ActiveValue::Set(Some(ppt_path));
        }
        if let Some(status) = changes.status {
            work_am.status = ActiveValue::Set(status);
        }

        if !work_am.is_changed() {
            return Ok(Some(unchanged));
        }

        Ok(Some(work_am.update(self.db).await?))
    }

    /// Assigns a user to a work
    ///
    /// Fails if the assignment already exists due to the unique (work, user) index.
    pub async fn assign_user(
        &self,
        work_id: i32,
        user_id: i32,
    ) -> Result<entity::assign_work::Model, DbErr> {
        let assignment = entity::assign_work::ActiveModel {
            work_id: ActiveValue::Set(work_id),
            user_id: ActiveValue::Set(user_id),
            assigned_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        assignment.insert(self.db).await
    }

    pub async fn is_assigned(&self, work_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::AssignWork::find()
            .filter(entity::assign_work::Column::WorkId.eq(work_id))
            .filter(entity::assign_work::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
