use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

/// Fields required to insert a new account
pub struct NewUser<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub status: &'a str,
}

/// Partial account update, `None` leaves the column unchanged
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Filters applied by [`UserRepository::list`]
#[derive(Debug, Default)]
pub struct UserFilter<'a> {
    pub status: Option<&'a str>,
    pub role: Option<&'a str>,
    /// Case-insensitive substring of username or full name
    pub search: Option<&'a str>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    pub async fn create(&self, user: NewUser<'_>) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            username: ActiveValue::Set(user.username.to_string()),
            full_name: ActiveValue::Set(user.full_name.to_string()),
            email: ActiveValue::Set(user.email.map(str::to_string)),
            password: ActiveValue::Set(user.password_hash.to_string()),
            role: ActiveValue::Set(user.role.to_string()),
            status: ActiveValue::Set(user.status.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Returns every user ordered by ID
    pub async fn get_all(&self) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns users with the given status ordered by ID
    pub async fn get_by_status(&self, status: &str) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Status.eq(status))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns users with the given role ordered by ID
    pub async fn get_by_role(&self, role: &str) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    /// Counts the users matching `filter`
    pub async fn count(&self, filter: &UserFilter<'_>) -> Result<u64, DbErr> {
        Self::filtered(filter).count(self.db).await
    }

    /// Returns one 0-indexed page of the users matching `filter`, ordered by ID
    pub async fn list(
        &self,
        filter: &UserFilter<'_>,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<entity::user::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, per_page)
            .fetch_page(page)
            .await
    }

    fn filtered(filter: &UserFilter<'_>) -> Select<entity::user::Entity> {
        let mut query = entity::prelude::User::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::user::Column::Status.eq(status));
        }
        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role));
        }
        if let Some(search) = filter.search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            let lower = |column: entity::user::Column| {
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\'))
            };

            query = query.filter(
                Condition::any()
                    .add(lower(entity::user::Column::Username))
                    .add(lower(entity::user::Column::FullName)),
            );
        }

        query
    }

    /// Checks whether `username` is taken by an account other than `excluding`
    pub async fn username_exists(
        &self,
        username: &str,
        excluding: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Username.eq(username));

        if let Some(user_id) = excluding {
            query = query.filter(entity::user::Column::Id.ne(user_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Applies `changes` to the user, returns `Ok(None)` if the user does not exist
    pub async fn update(
        &self,
        user_id: i32,
        changes: UserChanges,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let unchanged = user.clone();
        let mut user_am = user.into_active_model();
        if let Some(username) = changes.username {
            user_am.username = ActiveValue::Set(username);
        }
        if let Some(full_name) = changes.full_name {
            user_am.full_name = ActiveValue::Set(full_name);
        }
        if let Some(email) = changes.email {
            user_am.email = ActiveValue::Set(Some(email).filter(|e| !e.trim().is_empty()));
        }
        if let Some(password_hash) = changes.password_hash {
            user_am.password = ActiveValue::Set(password_hash);
        }
        if let Some(role) = changes.role {
            user_am.role = ActiveValue::Set(role);
        }
        if let Some(status) = changes.status {
            user_am.status = ActiveValue::Set(status);
        }

        if !user_am.is_changed() {
            return Ok(Some(unchanged));
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    pub async fn set_status(
        &self,
        user_id: i32,
        status: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update(
            user_id,
            UserChanges {
                status: Some(status.to_string()),
                ..Default::default()
            },
        )
        .await
    }
}

/// Escapes LIKE wildcards so user input only matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
