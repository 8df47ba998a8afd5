use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_KEY: &str = "autorbi:user";

/// The logged in account as kept in the session store
///
/// Only the ID is stored, role and status are read from the database on every request so
/// changes by an administrator apply immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUserId {
    pub user_id: i32,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionUserId {
    /// Marks `user_id` as logged in for this session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        let entry = SessionUserId {
            user_id,
            logged_in_at: Utc::now(),
        };
        session.insert(SESSION_USER_KEY, entry).await?;

        Ok(())
    }

    /// Returns the logged in user's ID, if any
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .get::<SessionUserId>(SESSION_USER_KEY)
            .await?
            .map(|entry| entry.user_id))
    }

    /// Forgets the logged in user, returning their ID if one was stored
    pub async fn remove(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .remove::<SessionUserId>(SESSION_USER_KEY)
            .await?
            .map(|entry| entry.user_id))
    }
}
