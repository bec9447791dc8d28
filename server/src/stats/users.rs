use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::messages;

use super::StatsError;

/// A message a user posted, with where it was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMessage {
    pub text: String,
    pub channel: String,
    pub channel_id: String,
    pub server: String,
    pub server_id: String,
}

/// Every message of the user with platform id `user_disc_id`, keyed by
/// message platform id. Unknown users have no messages.
pub async fn user_messages(
    pool: &SqlitePool,
    user_disc_id: &str,
) -> Result<BTreeMap<String, UserMessage>, StatsError> {
    let rows = messages::list_user_messages(pool, user_disc_id).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.disc_id,
                UserMessage {
                    text: row.text,
                    channel: row.channel_name,
                    channel_id: row.channel_disc_id,
                    server: row.server_name,
                    server_id: row.server_disc_id,
                },
            )
        })
        .collect())
}
