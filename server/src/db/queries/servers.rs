use sqlx::SqlitePool;

use crate::db::models::ServerRow;

/// List every tracked server.
pub async fn list_servers(pool: &SqlitePool) -> Result<Vec<ServerRow>, sqlx::Error> {
    sqlx::query_as::<_, ServerRow>("SELECT id, disc_id, name FROM servers ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Look a server up by its platform id.
pub async fn get_server_by_disc_id(
    pool: &SqlitePool,
    disc_id: &str,
) -> Result<Option<ServerRow>, sqlx::Error> {
    sqlx::query_as::<_, ServerRow>("SELECT id, disc_id, name FROM servers WHERE disc_id = ?")
        .bind(disc_id)
        .fetch_optional(pool)
        .await
}

/// Number of members in a server.
pub async fn count_members(pool: &SqlitePool, server_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM server_members WHERE server_id = ?")
        .bind(server_id)
        .fetch_one(pool)
        .await
}

/// Number of members whose `joined_at` is at or after `since`.
pub async fn count_members_joined_since(
    pool: &SqlitePool,
    server_id: &str,
    since: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM server_members \
         WHERE server_id = ? AND datetime(joined_at) >= datetime(?)",
    )
    .bind(server_id)
    .bind(since)
    .fetch_one(pool)
    .await
}

/// `joined_at` of the earliest member, or `None` for an empty server.
pub async fn first_member_joined_at(
    pool: &SqlitePool,
    server_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT datetime(joined_at) FROM server_members \
         WHERE server_id = ? \
         ORDER BY datetime(joined_at) \
         LIMIT 1",
    )
    .bind(server_id)
    .fetch_optional(pool)
    .await
}

/// Number of channels in a server, text and voice alike.
pub async fn count_channels(pool: &SqlitePool, server_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM channels WHERE server_id = ?")
        .bind(server_id)
        .fetch_one(pool)
        .await
}
