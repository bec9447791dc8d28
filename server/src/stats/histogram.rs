//! Messages-per-hour histograms by day of week and hour of day.
//!
//! Counts come grouped from SQL; rates are normalised over the observation
//! window, which runs from the calendar day of the first message in scope to
//! the calendar day of `now`, both inclusive.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::BucketCountRow;
use crate::db::queries::activity;
use crate::db::queries::messages::{self, MessageScope};

use super::{StatsError, parse_stored};

/// Both histograms for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityHistogram {
    /// Average messages per hour on each weekday, Monday first.
    pub mph_by_dow: [f64; 7],
    /// Average messages sent during each hour of the day, hour 0 first.
    pub mph_by_hod: [f64; 24],
}

impl ActivityHistogram {
    pub fn empty() -> Self {
        Self {
            mph_by_dow: [0.0; 7],
            mph_by_hod: [0.0; 24],
        }
    }
}

/// Compute both histograms for a server or a channel.
pub async fn activity_histogram(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
    now: DateTime<Utc>,
) -> Result<ActivityHistogram, StatsError> {
    let Some(first) = messages::first_message_at(pool, scope).await? else {
        return Ok(ActivityHistogram::empty());
    };
    let first_day = parse_stored(&first)?.date_naive();
    let today = now.date_naive();

    let by_weekday = activity::counts_by_weekday(pool, scope).await?;
    let by_hour = activity::counts_by_hour(pool, scope).await?;

    Ok(ActivityHistogram {
        mph_by_dow: weekday_rates(&by_weekday, first_day, today),
        mph_by_hod: hourly_rates(&by_hour, first_day, today),
    })
}

/// Number of days in the window, never less than one.
fn window_days(first_day: NaiveDate, today: NaiveDate) -> i64 {
    ((today - first_day).num_days() + 1).max(1)
}

/// How many dates in the window fall on each weekday, Monday first.
fn weekday_occurrences(first_day: NaiveDate, today: NaiveDate) -> [i64; 7] {
    let days = window_days(first_day, today);
    let start = first_day.weekday().num_days_from_monday() as i64;
    let mut occurrences = [days / 7; 7];
    for offset in 0..days % 7 {
        occurrences[((start + offset) % 7) as usize] += 1;
    }
    occurrences
}

/// Turn weekday counts (`0` = Sunday) into per-hour rates, Monday first.
pub fn weekday_rates(counts: &[BucketCountRow], first_day: NaiveDate, today: NaiveDate) -> [f64; 7] {
    let occurrences = weekday_occurrences(first_day, today);
    let mut rates = [0.0; 7];
    for row in counts {
        if !(0..7).contains(&row.bucket) {
            continue;
        }
        let idx = ((row.bucket + 6) % 7) as usize;
        if occurrences[idx] > 0 {
            rates[idx] = row.count as f64 / (occurrences[idx] * 24) as f64;
        }
    }
    rates
}

/// Turn hour-of-day counts into average messages per day in that hour.
pub fn hourly_rates(counts: &[BucketCountRow], first_day: NaiveDate, today: NaiveDate) -> [f64; 24] {
    let days = window_days(first_day, today) as f64;
    let mut rates = [0.0; 24];
    for row in counts {
        if let Some(slot) = usize::try_from(row.bucket).ok().and_then(|h| rates.get_mut(h)) {
            *slot = row.count as f64 / days;
        }
    }
    rates
}
