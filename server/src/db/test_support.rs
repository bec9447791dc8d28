//! Fixtures for tests. The service itself never writes these tables; rows
//! come from the ingestion bot in production.

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::pool::{create_pool, run_migrations};

/// Create an in-memory SQLite pool with all migrations applied.
pub async fn setup_db() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 5).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Create a migrated database file under the temp dir. Pair with
/// [`remove_file_db`].
pub async fn setup_file_db() -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("chatstats-test-{}.db", Uuid::new_v4()));
    let pool = create_pool(&format!("sqlite:{}", path.display()), 8)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    (pool, path)
}

/// Close the pool and delete the database file with its WAL side files.
pub async fn remove_file_db(pool: SqlitePool, path: &Path) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

/// Insert a server and return its storage id.
pub async fn insert_server(pool: &SqlitePool, disc_id: &str, name: &str) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO servers (id, disc_id, name) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(disc_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Insert a user and return its storage id.
pub async fn insert_user(pool: &SqlitePool, disc_id: &str, name: &str) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO users (id, disc_id, name) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(disc_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn add_member(pool: &SqlitePool, server_id: &str, user_id: &str, joined_at: &str) {
    sqlx::query("INSERT INTO server_members (server_id, user_id, joined_at) VALUES (?, ?, ?)")
        .bind(server_id)
        .bind(user_id)
        .bind(joined_at)
        .execute(pool)
        .await
        .unwrap();
}

/// Insert a channel and return its storage id.
pub async fn insert_channel(
    pool: &SqlitePool,
    server_id: &str,
    disc_id: &str,
    name: &str,
    channel_type: Option<&str>,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO channels (id, disc_id, server_id, name, channel_type) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(disc_id)
    .bind(server_id)
    .bind(name)
    .bind(channel_type)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Insert a message with a random platform id and return its storage id.
pub async fn insert_message(
    pool: &SqlitePool,
    channel_id: &str,
    author_id: &str,
    text: &str,
    created_at: &str,
) -> String {
    let disc_id = Uuid::new_v4().simple().to_string();
    insert_message_with_disc_id(pool, channel_id, author_id, &disc_id, text, created_at).await
}

pub async fn insert_message_with_disc_id(
    pool: &SqlitePool,
    channel_id: &str,
    author_id: &str,
    disc_id: &str,
    text: &str,
    created_at: &str,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO messages (id, disc_id, channel_id, author_id, text, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(disc_id)
    .bind(channel_id)
    .bind(author_id)
    .bind(text)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
    id
}
