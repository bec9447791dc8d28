use thiserror::Error;

/// Failures while computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Average join rate is undefined for a server nobody has joined.
    #[error("server {0} has no members")]
    NoMembers(String),
    /// There is no last message to report.
    #[error("server {0} has no messages")]
    NoMessages(String),
    #[error("server {0} not found")]
    ServerNotFound(String),
    #[error("invalid stored timestamp {value:?}")]
    BadTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StatsError {
    pub(crate) fn bad_timestamp(value: &str, source: chrono::ParseError) -> Self {
        StatsError::BadTimestamp {
            value: value.to_string(),
            source,
        }
    }
}
