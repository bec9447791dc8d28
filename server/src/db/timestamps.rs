use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format of every timestamp column, matching SQLite's `datetime()`.
pub const DB_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an instant for comparison against timestamp columns.
pub fn to_db_time(instant: DateTime<Utc>) -> String {
    instant.format(DB_TIME_FORMAT).to_string()
}

/// Parse a timestamp column. Accepts fractional seconds and the RFC 3339
/// `T` separator some ingestion paths write.
pub fn parse_db_time(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let normalized = value.trim().trim_end_matches('Z').replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f").map(|naive| naive.and_utc())
}
