use sqlx::SqlitePool;

use crate::db::models::{ChannelRow, LastMessageRow};

/// List all channels in a server.
pub async fn list_channels(
    pool: &SqlitePool,
    server_id: &str,
) -> Result<Vec<ChannelRow>, sqlx::Error> {
    sqlx::query_as::<_, ChannelRow>("SELECT * FROM channels WHERE server_id = ? ORDER BY name")
        .bind(server_id)
        .fetch_all(pool)
        .await
}

/// Recompute the newest message of a channel and store it in the channel's
/// cache columns. Returns the fresh value; `None` when the channel is empty,
/// in which case the cache is cleared.
///
/// Must stay a single statement: a deferred read-then-write transaction gets
/// `SQLITE_BUSY` on lock upgrade without waiting on the busy timeout.
pub async fn refresh_last_message(
    pool: &SqlitePool,
    channel_id: &str,
) -> Result<Option<LastMessageRow>, sqlx::Error> {
    let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
        "UPDATE channels SET (last_message_id, last_message_at) = ( \
             SELECT id, datetime(created_at) FROM messages \
             WHERE channel_id = ?1 \
             ORDER BY datetime(created_at) DESC, rowid DESC \
             LIMIT 1) \
         WHERE id = ?1 \
         RETURNING last_message_id, last_message_at",
    )
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(match row {
        Some((Some(message_id), Some(created_at))) => Some(LastMessageRow {
            message_id,
            created_at,
        }),
        _ => None,
    })
}

/// Read the cached newest message without touching `messages`. Reflects the
/// state as of the last [`refresh_last_message`] call.
pub async fn cached_last_message(
    pool: &SqlitePool,
    channel_id: &str,
) -> Result<Option<LastMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, LastMessageRow>(
        "SELECT last_message_id AS message_id, last_message_at AS created_at \
         FROM channels \
         WHERE id = ? AND last_message_id IS NOT NULL AND last_message_at IS NOT NULL",
    )
    .bind(channel_id)
    .fetch_optional(pool)
    .await
}
