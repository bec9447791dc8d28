use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describe `then` relative to `now` in words: "just now", "5 minutes ago",
/// "in 2 days".
pub fn humanize(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (now - then).num_seconds();
    let future = delta < 0;
    let secs = delta.abs();

    let phrase = if secs < 10 {
        return "just now".to_string();
    } else if secs < 45 {
        format!("{secs} seconds")
    } else if secs < 90 {
        "a minute".to_string()
    } else if secs < 45 * MINUTE {
        format!("{} minutes", (secs / MINUTE).max(2))
    } else if secs < 90 * MINUTE {
        "an hour".to_string()
    } else if secs < 22 * HOUR {
        format!("{} hours", (secs / HOUR).max(2))
    } else if secs < 36 * HOUR {
        "a day".to_string()
    } else if secs < WEEK {
        format!("{} days", (secs / DAY).max(2))
    } else if secs < 2 * WEEK {
        "a week".to_string()
    } else if secs < MONTH {
        format!("{} weeks", secs / WEEK)
    } else if secs < 45 * DAY {
        "a month".to_string()
    } else if secs < YEAR {
        format!("{} months", (secs / MONTH).max(2))
    } else if secs < 2 * YEAR {
        "a year".to_string()
    } else {
        format!("{} years", secs / YEAR)
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}
