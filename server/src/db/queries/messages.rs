use sqlx::SqlitePool;

use crate::db::models::UserMessageRow;

/// Which messages an aggregate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageScope<'a> {
    /// Every message in every channel of a server (storage id).
    Server(&'a str),
    /// Messages of a single channel (storage id).
    Channel(&'a str),
}

impl<'a> MessageScope<'a> {
    /// `FROM ... WHERE ...` fragment selecting the scoped messages as `m`.
    /// Takes exactly one bind parameter, [`MessageScope::id`].
    pub(crate) fn from_clause(&self) -> &'static str {
        match self {
            MessageScope::Server(_) => {
                "FROM messages m JOIN channels c ON c.id = m.channel_id WHERE c.server_id = ?"
            }
            MessageScope::Channel(_) => "FROM messages m WHERE m.channel_id = ?",
        }
    }

    pub(crate) fn id(&self) -> &'a str {
        match self {
            MessageScope::Server(id) | MessageScope::Channel(id) => id,
        }
    }
}

/// Count scoped messages, optionally only those created at or after `since`.
/// Timestamps are compared through `datetime()`, so rows written with a `T`
/// separator or a `Z` suffix sort with the rest.
pub async fn count_messages(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
    since: Option<&str>,
) -> Result<i64, sqlx::Error> {
    match since {
        Some(since) => {
            let sql = format!(
                "SELECT COUNT(*) {} AND datetime(m.created_at) >= datetime(?)",
                scope.from_clause()
            );
            sqlx::query_scalar(&sql)
                .bind(scope.id())
                .bind(since)
                .fetch_one(pool)
                .await
        }
        None => {
            let sql = format!("SELECT COUNT(*) {}", scope.from_clause());
            sqlx::query_scalar(&sql).bind(scope.id()).fetch_one(pool).await
        }
    }
}

/// `created_at` of the oldest scoped message, as `datetime()` text.
pub async fn first_message_at(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
) -> Result<Option<String>, sqlx::Error> {
    let sql = format!("SELECT MIN(datetime(m.created_at)) {}", scope.from_clause());
    sqlx::query_scalar(&sql).bind(scope.id()).fetch_one(pool).await
}

/// `created_at` of the newest scoped message, as `datetime()` text.
pub async fn last_message_at(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
) -> Result<Option<String>, sqlx::Error> {
    let sql = format!("SELECT MAX(datetime(m.created_at)) {}", scope.from_clause());
    sqlx::query_scalar(&sql).bind(scope.id()).fetch_one(pool).await
}

/// All messages authored by the user with the given platform id, with the
/// names and platform ids of the channel and server they were posted in.
pub async fn list_user_messages(
    pool: &SqlitePool,
    user_disc_id: &str,
) -> Result<Vec<UserMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, UserMessageRow>(
        "SELECT m.disc_id, m.text, \
         c.name AS channel_name, c.disc_id AS channel_disc_id, \
         s.name AS server_name, s.disc_id AS server_disc_id \
         FROM messages m \
         JOIN users u ON u.id = m.author_id \
         JOIN channels c ON c.id = m.channel_id \
         JOIN servers s ON s.id = c.server_id \
         WHERE u.disc_id = ? \
         ORDER BY datetime(m.created_at), m.rowid",
    )
    .bind(user_disc_id)
    .fetch_all(pool)
    .await
}
