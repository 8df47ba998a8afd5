use chrono::{NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{analytics::ActivityItemDto, user::UserDto},
    server::{
        data::work_history::WorkHistoryRepository,
        error::Error,
        model::db::{UserModel, WorkHistoryModel},
        service::analytics::dashboard::scoped_work_ids,
        util::time::format_time_ago,
    },
};

/// Number of entries shown in the activity feed
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 10;

/// `equipment_extracted` becomes `Equipment Extracted`
pub fn humanize_action(action_type: &str) -> String {
    action_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn activity_item(
    entry: WorkHistoryModel,
    user: Option<UserModel>,
    now: NaiveDateTime,
) -> ActivityItemDto {
    let description = entry
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| humanize_action(&entry.action_type));
    let user = match user {
        Some(user) if !user.full_name.trim().is_empty() => user.full_name,
        Some(user) => user.username,
        None => "Unknown".to_string(),
    };

    ActivityItemDto {
        time_ago: format_time_ago(entry.timestamp, now),
        action_type: entry.action_type,
        description,
        user,
        timestamp: entry.timestamp,
    }
}

/// Newest work history entries visible to the user
///
/// Administrators see every work, engineers only the works assigned to them.
pub async fn recent_activity(
    db: &DatabaseConnection,
    user: &UserDto,
    limit: u64,
) -> Result<Vec<ActivityItemDto>, Error> {
    let work_ids = scoped_work_ids(db, user).await?;
    let entries = WorkHistoryRepository::new(db)
        .get_recent(limit, work_ids.as_deref())
        .await?;

    let now = Utc::now().naive_utc();

    Ok(entries
        .into_iter()
        .map(|(entry, user)| activity_item(entry, user, now))
        .collect())
}
