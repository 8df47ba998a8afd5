use tower_sessions::Session;

use crate::{
    model::user::{UserDto, UserRole, UserStatus},
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

/// Retrieves the logged in user from the session and then from the database
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserDto)`: The logged in, active user
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: No user ID in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID in session but not found in
///   database (removed from session)
/// - `Err(Error::AuthError(AuthError::AccountInactive))`: The account was deactivated after
///   login (removed from session)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserService::new(&state.db).get_user(user_id).await? else {
        SessionUserId::remove(session).await?;

        tracing::debug!(
            "Removed user ID {} from session, the account no longer exists",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    if user.status != UserStatus::Active {
        SessionUserId::remove(session).await?;

        return Err(Error::AuthError(AuthError::AccountInactive));
    }

    Ok(user)
}

/// Retrieves the logged in user and fails unless they are an administrator
pub async fn get_admin_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserDto, Error> {
    let user = get_user_from_session(state, session).await?;

    if user.role != UserRole::Admin {
        return Err(AuthError::AdminRequired("Administrator access required".to_string()).into());
    }

    Ok(user)
}
