//! User service layer.
//!
//! Account management for administrators and engineers. Accounts are never removed,
//! deactivation flips their status to `Inactive`.

#[cfg(test)]
mod tests;

use sea_orm::DatabaseConnection;

use crate::{
    model::user::{
        AdminUpdateUserDto, CreateUserDto, UpdateProfileDto, UserDto, UserListDto, UserListQuery,
        UserRole, UserStatus,
    },
    server::{
        data::user::{NewUser, UserChanges, UserFilter, UserRepository},
        error::{auth::AuthError, validation::ValidationError, Error},
        model::db::UserModel,
        service::{
            auth::password::hash_password,
            validation::{
                normalize_user_status, parse_user_role, parse_user_status, validate_full_name,
                validate_password, validate_username,
            },
        },
        util::pagination::Pagination,
    },
};

/// Converts a stored user into its API representation
///
/// Fails if the stored role is not one of the known roles.
pub fn user_dto(user: UserModel) -> Result<UserDto, Error> {
    let role = UserRole::parse(&user.role).ok_or(AuthError::InvalidStoredRole(user.id))?;
    // Unrecognized stored statuses are treated as inactive
    let status = normalize_user_status(&user.status).unwrap_or(UserStatus::Inactive);

    Ok(UserDto {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        role,
        status,
        created_at: user.created_at,
    })
}

fn user_dtos(users: Vec<UserModel>) -> Result<Vec<UserDto>, Error> {
    users.into_iter().map(user_dto).collect()
}

/// Service for managing user accounts
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of UserService
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active account after validating the input
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created account
    /// - `Err(Error::ValidationError)` - Invalid username, password, full name or role, or
    ///   the username is already taken
    /// - `Err(Error::PasswordHashError)` - The password could not be hashed
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn create_user(&self, user: CreateUserDto) -> Result<UserDto, Error> {
        let role = match non_blank(user.role.clone()) {
            Some(role) => parse_user_role(&role)?,
            None => UserRole::Engineer,
        };

        self.insert_user(user, role).await
    }

    /// Creates an engineer account, self-registration never grants admin rights
    pub async fn register_engineer(
        &self,
        username: String,
        full_name: String,
        password: String,
        email: Option<String>,
    ) -> Result<UserDto, Error> {
        let user = CreateUserDto {
            username,
            full_name,
            password,
            email,
            role: None,
        };

        self.insert_user(user, UserRole::Engineer).await
    }

    async fn insert_user(&self, user: CreateUserDto, role: UserRole) -> Result<UserDto, Error> {
        let username = user.username.trim();
        validate_username(username)?;
        validate_password(&user.password)?;
        validate_full_name(&user.full_name)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.username_exists(username, None).await? {
            return Err(ValidationError::UsernameTaken.into());
        }

        let password_hash = hash_password(&user.password)?;
        let email = user
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());

        let created = user_repo
            .create(NewUser {
                username,
                full_name: user.full_name.trim(),
                email,
                password_hash: &password_hash,
                role: role.as_str(),
                status: UserStatus::Active.as_str(),
            })
            .await?;

        tracing::info!(
            user_id = %created.id,
            role = %role,
            "Created user account {}",
            created.username
        );

        user_dto(created)
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let user_repo = UserRepository::new(self.db);

        user_repo.get_by_id(user_id).await?.map(user_dto).transpose()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserDto>, Error> {
        let user_repo = UserRepository::new(self.db);

        user_repo
            .get_by_username(username)
            .await?
            .map(user_dto)
            .transpose()
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserDto>, Error> {
        let user_repo = UserRepository::new(self.db);

        user_dtos(user_repo.get_all().await?)
    }

    pub async fn get_active_users(&self) -> Result<Vec<UserDto>, Error> {
        let user_repo = UserRepository::new(self.db);

        user_dtos(user_repo.get_by_status(UserStatus::Active.as_str()).await?)
    }

    /// Lists users for the management view with filters and clamped pagination
    ///
    /// Blank filters are ignored, unknown status or role values fail validation.
    pub async fn list_users(&self, query: UserListQuery) -> Result<UserListDto, Error> {
        let status = non_blank(query.status)
            .map(|status| parse_user_status(&status))
            .transpose()?;
        let role = non_blank(query.role)
            .map(|role| parse_user_role(&role))
            .transpose()?;

        let user_repo = UserRepository::new(self.db);
        let filter = UserFilter {
            status: status.map(UserStatus::as_str),
            role: role.map(UserRole::as_str),
            search: query.search.as_deref(),
        };

        let total = user_repo.count(&filter).await?;
        let pagination = Pagination::new(query.page, query.per_page, total);
        let users = user_repo
            .list(&filter, pagination.page_index(), pagination.per_page)
            .await?;

        Ok(UserListDto {
            users: user_dtos(users)?,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages,
            start: pagination.start(),
            end: pagination.end(),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
        })
    }

    /// Applies an administrator's partial update
    ///
    /// Blank names are ignored, the status is normalized and a new password is re-hashed.
    /// Administrators cannot change their own role or status.
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - The updated account
    /// - `Ok(None)` - No account with that ID
    /// - `Err(Error::ValidationError)` - A provided value failed validation
    /// - `Err(Error::AuthError)` - The update would change the acting admin's role or status
    pub async fn admin_update_user(
        &self,
        acting_user_id: i32,
        user_id: i32,
        update: AdminUpdateUserDto,
    ) -> Result<Option<UserDto>, Error> {
        let user_repo = UserRepository::new(self.db);
        let mut changes = UserChanges::default();

        let role = update.role.as_deref().map(parse_user_role).transpose()?;
        let status = update.status.as_deref().map(parse_user_status).transpose()?;

        if acting_user_id == user_id && (role.is_some() || status.is_some()) {
            let Some(current) = user_repo.get_by_id(user_id).await? else {
                return Ok(None);
            };
            let changes_role = role.is_some_and(|role| role.as_str() != current.role);
            let changes_status = status.is_some_and(|status| {
                normalize_user_status(&current.status) != Some(status)
            });
            if changes_role || changes_status {
                return Err(AuthError::CannotModifySelf.into());
            }
        }

        if let Some(username) = non_blank(update.username) {
            validate_username(&username)?;
            if user_repo.username_exists(&username, Some(user_id)).await? {
                return Err(ValidationError::UsernameTaken.into());
            }
            changes.username = Some(username);
        }
        if let Some(full_name) = non_blank(update.full_name) {
            validate_full_name(&full_name)?;
            changes.full_name = Some(full_name);
        }
        if let Some(email) = update.email {
            changes.email = Some(email.trim().to_string());
        }
        if let Some(role) = role {
            changes.role = Some(role.as_str().to_string());
        }
        if let Some(status) = status {
            changes.status = Some(status.as_str().to_string());
        }
        if let Some(password) = update.password.filter(|p| !p.is_empty()) {
            validate_password(&password)?;
            changes.password_hash = Some(hash_password(&password)?);
        }

        let updated = user_repo.update(user_id, changes).await?;
        if updated.is_some() {
            tracing::info!(user_id = %user_id, "Updated user account");
        }

        updated.map(user_dto).transpose()
    }

    /// Updates the caller's own profile, only non-empty values are applied
    pub async fn update_self(
        &self,
        user_id: i32,
        update: UpdateProfileDto,
    ) -> Result<Option<UserDto>, Error> {
        let mut changes = UserChanges::default();

        if let Some(full_name) = non_blank(update.full_name) {
            validate_full_name(&full_name)?;
            changes.full_name = Some(full_name);
        }
        if let Some(password) = update.password.filter(|p| !p.is_empty()) {
            validate_password(&password)?;
            changes.password_hash = Some(hash_password(&password)?);
        }

        let user_repo = UserRepository::new(self.db);

        user_repo
            .update(user_id, changes)
            .await?
            .map(user_dto)
            .transpose()
    }

    /// Soft deletes an account by marking it inactive
    ///
    /// Administrators cannot deactivate their own account.
    pub async fn deactivate_user(
        &self,
        acting_user_id: i32,
        user_id: i32,
    ) -> Result<Option<UserDto>, Error> {
        if acting_user_id == user_id {
            return Err(AuthError::CannotModifySelf.into());
        }

        let user_repo = UserRepository::new(self.db);
        let updated = user_repo
            .set_status(user_id, UserStatus::Inactive.as_str())
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = %user_id, "Deactivated user account");
        }

        updated.map(user_dto).transpose()
    }

    /// Flips an account between active and inactive
    ///
    /// Administrators cannot toggle their own account.
    pub async fn toggle_user_status(
        &self,
        acting_user_id: i32,
        user_id: i32,
    ) -> Result<Option<UserDto>, Error> {
        if acting_user_id == user_id {
            return Err(AuthError::CannotModifySelf.into());
        }

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let current = user_dto(user)?.status;
        let updated = user_repo
            .set_status(user_id, current.toggled().as_str())
            .await?;

        tracing::info!(
            user_id = %user_id,
            "Changed user status from {} to {}",
            current,
            current.toggled()
        );

        updated.map(user_dto).transpose()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
