//! Time formatting and analytics period utilities.

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Formats how long ago `timestamp` was relative to `now` for the activity feed
///
/// Timestamps at least a week old are shown as a short date such as `Jan 05`.
pub fn format_time_ago(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    if elapsed < Duration::minutes(1) {
        "Just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed < Duration::days(7) {
        format!("{}d ago", elapsed.num_days())
    } else {
        timestamp.format("%b %d").to_string()
    }
}

/// Reporting window for admin analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsPeriod {
    Today,
    Last7Days,
    LastMonth,
    All,
}

impl AnalyticsPeriod {
    /// Parses a period name, unknown names fall back to [`AnalyticsPeriod::All`] with a warning
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => Self::Today,
            "last_7_days" => Self::Last7Days,
            "last_month" => Self::LastMonth,
            "all" => Self::All,
            other => {
                tracing::warn!(period = %other, "Unknown analytics period, using all time");
                Self::All
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7Days => "last_7_days",
            Self::LastMonth => "last_month",
            Self::All => "all",
        }
    }

    /// Inclusive start and end of the period relative to `now`, `None` is unbounded
    pub fn date_range(
        self,
        now: NaiveDateTime,
    ) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        match self {
            Self::Today => {
                let day = now.date();
                let end = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
                    .map(|time| day.and_time(time));
                (Some(day.and_time(NaiveTime::MIN)), end)
            }
            Self::Last7Days => (Some(now - Duration::days(7)), Some(now)),
            Self::LastMonth => (Some(now - Duration::days(30)), Some(now)),
            Self::All => (None, None),
        }
    }
}
