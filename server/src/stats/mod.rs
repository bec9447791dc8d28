//! Aggregations behind the dashboard endpoints. Every function takes the
//! current instant explicitly so windows like "last hour" are reproducible.

pub mod channel;
pub mod error;
pub mod histogram;
pub mod humanize;
pub mod server;
pub mod users;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::timestamps::parse_db_time;

pub use error::StatsError;

/// A timestamp together with its humanized distance from now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateInfo {
    pub date: DateTime<Utc>,
    pub date_text: String,
}

impl DateInfo {
    pub fn new(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            date,
            date_text: humanize::humanize(date, now),
        }
    }
}

/// Parse a stored timestamp, mapping failures into [`StatsError`].
pub(crate) fn parse_stored(value: &str) -> Result<DateTime<Utc>, StatsError> {
    parse_db_time(value).map_err(|e| StatsError::bad_timestamp(value, e))
}
