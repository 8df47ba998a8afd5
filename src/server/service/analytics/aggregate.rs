//! Pure aggregations over fetched history, equipment and component rows.
//!
//! Aggregating in Rust rather than SQL keeps the queries identical on SQLite and PostgreSQL.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDateTime, Timelike};

use crate::{
    model::{
        analytics::{
            DailyActivityDto, HealthStatus, HourlyProductivityDto, InsightsDto, PeakHoursDto,
            TeamMemberPerformanceDto, TeamSummaryDto, UserWorkTimelineDto,
        },
        work::TrackedFieldsDto,
    },
    server::model::db::{CorrectionLogModel, EquipmentModel, UserModel, WorkHistoryModel},
};

/// Rounds to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}

pub fn actions_by_type(history: &[WorkHistoryModel]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for entry in history {
        *counts.entry(entry.action_type.clone()).or_insert(0) += 1;
    }

    counts
}

/// Average minutes spent per extracted equipment
///
/// For every work in `history` the span between its first and last entry is summed, then
/// divided by the number of equipment extracted. 0 when nothing was extracted.
pub fn avg_minutes_per_equipment(history: &[WorkHistoryModel], equipment_extracted: u64) -> f64 {
    if equipment_extracted == 0 {
        return 0.0;
    }

    let mut spans: HashMap<i32, (NaiveDateTime, NaiveDateTime)> = HashMap::new();
    for entry in history {
        spans
            .entry(entry.work_id)
            .and_modify(|(first, last)| {
                *first = (*first).min(entry.timestamp);
                *last = (*last).max(entry.timestamp);
            })
            .or_insert((entry.timestamp, entry.timestamp));
    }

    let total_minutes: f64 = spans
        .values()
        .map(|(first, last)| minutes_between(*first, *last))
        .sum();

    round_to(total_minutes / equipment_extracted as f64, 2)
}

/// Per-engineer counters from rows fetched for the whole team, busiest first
///
/// Rows belonging to users outside `engineers` are ignored. Ties keep the order of
/// `engineers`.
pub fn team_members(
    engineers: Vec<UserModel>,
    history: Vec<WorkHistoryModel>,
    extracted: &[EquipmentModel],
    corrections: &[CorrectionLogModel],
) -> Vec<TeamMemberPerformanceDto> {
    let mut history_by_user: HashMap<i32, Vec<WorkHistoryModel>> = HashMap::new();
    for entry in history {
        history_by_user.entry(entry.user_id).or_default().push(entry);
    }

    let mut extracted_by_user: HashMap<i32, u64> = HashMap::new();
    for user_id in extracted.iter().filter_map(|equipment| equipment.extracted_by) {
        *extracted_by_user.entry(user_id).or_insert(0) += 1;
    }

    let mut corrections_by_user: HashMap<i32, u64> = HashMap::new();
    for correction in corrections {
        *corrections_by_user.entry(correction.user_id).or_insert(0) += 1;
    }

    let mut members: Vec<TeamMemberPerformanceDto> = engineers
        .into_iter()
        .map(|engineer| {
            let history = history_by_user.remove(&engineer.id).unwrap_or_default();
            let equipment_extracted = extracted_by_user.get(&engineer.id).copied().unwrap_or(0);

            TeamMemberPerformanceDto {
                user_id: engineer.id,
                username: engineer.username,
                full_name: engineer.full_name,
                total_actions: history.len() as u64,
                equipment_extracted,
                corrections_made: corrections_by_user.get(&engineer.id).copied().unwrap_or(0),
                avg_time_per_equipment_minutes: avg_minutes_per_equipment(
                    &history,
                    equipment_extracted,
                ),
            }
        })
        .collect();
    members.sort_by(|a, b| b.total_actions.cmp(&a.total_actions));

    members
}

/// Team totals, the average time only counts members with a non-zero average
pub fn team_summary(members: &[TeamMemberPerformanceDto], period: &str) -> TeamSummaryDto {
    let timed: Vec<f64> = members
        .iter()
        .map(|m| m.avg_time_per_equipment_minutes)
        .filter(|avg| *avg > 0.0)
        .collect();

    let team_avg = if timed.is_empty() {
        0.0
    } else {
        timed.iter().sum::<f64>() / timed.len() as f64
    };

    TeamSummaryDto {
        total_engineers: members.len() as u64,
        total_team_actions: members.iter().map(|m| m.total_actions).sum(),
        total_equipment_extracted: members.iter().map(|m| m.equipment_extracted).sum(),
        team_avg_time_per_equipment: round_to(team_avg, 2),
        period: period.to_string(),
    }
}

/// Per user first and last action on a work, ordered by first action
pub fn user_timelines(
    history: &[(WorkHistoryModel, Option<UserModel>)],
) -> Vec<UserWorkTimelineDto> {
    let mut timelines: Vec<UserWorkTimelineDto> = Vec::new();

    for (entry, user) in history {
        match timelines.iter_mut().find(|t| t.user_id == entry.user_id) {
            Some(timeline) => {
                timeline.first_action = timeline.first_action.min(entry.timestamp);
                timeline.last_action = timeline.last_action.max(entry.timestamp);
                timeline.action_count += 1;
            }
            None => timelines.push(UserWorkTimelineDto {
                user_id: entry.user_id,
                username: user
                    .as_ref()
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
                first_action: entry.timestamp,
                last_action: entry.timestamp,
                duration_minutes: 0.0,
                action_count: 1,
            }),
        }
    }

    for timeline in &mut timelines {
        timeline.duration_minutes =
            round_to(minutes_between(timeline.first_action, timeline.last_action), 2);
    }
    timelines.sort_by_key(|t| t.first_action);

    timelines
}

/// Action counts per hour of day, only hours with activity, ordered by hour
pub fn hourly_productivity(timestamps: &[NaiveDateTime]) -> Vec<HourlyProductivityDto> {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for timestamp in timestamps {
        *counts.entry(timestamp.hour()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(hour, action_count)| HourlyProductivityDto { hour, action_count })
        .collect()
}

/// Action counts per calendar day, only active days, ordered by date
pub fn daily_activity(timestamps: &[NaiveDateTime]) -> Vec<DailyActivityDto> {
    let mut counts = BTreeMap::new();
    for timestamp in timestamps {
        *counts.entry(timestamp.date()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(date, action_count)| DailyActivityDto { date, action_count })
        .collect()
}

/// Most and least productive hours, ties resolve to the earliest hour
pub fn peak_hours(hourly: &[HourlyProductivityDto]) -> Option<PeakHoursDto> {
    let first = hourly.first()?;
    let (mut most, mut least) = (first, first);

    for hour in hourly {
        if hour.action_count > most.action_count {
            most = hour;
        }
        if hour.action_count < least.action_count {
            least = hour;
        }
    }

    Some(PeakHoursDto {
        most_productive_hour: most.hour,
        most_productive_count: most.action_count,
        least_productive_hour: least.hour,
        least_productive_count: least.action_count,
    })
}

pub fn insights(daily: &[DailyActivityDto]) -> InsightsDto {
    let total: u64 = daily.iter().map(|d| d.action_count).sum();
    let avg_actions_per_day = if daily.is_empty() {
        0.0
    } else {
        round_to(total as f64 / daily.len() as f64, 2)
    };

    // Ties resolve to the earliest day
    let most_active_day = daily
        .iter()
        .fold(None::<&DailyActivityDto>, |best, day| match best {
            Some(best) if best.action_count >= day.action_count => Some(best),
            _ => Some(day),
        })
        .map(|d| d.date);

    InsightsDto {
        total_days_active: daily.len() as u64,
        avg_actions_per_day,
        most_active_day,
    }
}

/// Extracted equipment as a whole percentage of all equipment, 0 without equipment
pub fn completion_percentage(extracted: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }

    (extracted as f64 / total as f64 * 100.0).round() as u32
}

/// Percentage of tracked fields filled across components, `None` without components
pub fn health_score<'a>(components: impl IntoIterator<Item = &'a TrackedFieldsDto>) -> Option<u32> {
    let (filled, components) = components
        .into_iter()
        .fold((0usize, 0usize), |(filled, count), fields| {
            (filled + fields.filled_count(), count + 1)
        });

    if components == 0 {
        return None;
    }

    let possible = components * TrackedFieldsDto::FIELD_COUNT;
    Some((filled as f64 / possible as f64 * 100.0).round() as u32)
}

pub fn health_status(score: u32) -> HealthStatus {
    match score {
        80.. => HealthStatus::Excellent,
        60..=79 => HealthStatus::Good,
        _ => HealthStatus::NeedsAttention,
    }
}

/// Integer mean, 0 for no values
pub fn mean(values: &[u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }

    (values.iter().map(|v| u64::from(*v)).sum::<u64>() / values.len() as u64) as u32
}

/// Percentage with one decimal place, 0 when `total` is 0
pub fn success_rate(extracted: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    round_to(extracted as f64 / total as f64 * 100.0, 1)
}
