use serde::Serialize;

/// A chat server (guild) as stored by the ingestion bot.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServerRow {
    pub id: String,
    pub disc_id: String,
    pub name: String,
}

/// A stored channel. `last_message_*` are the cached newest message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelRow {
    pub id: String,
    pub disc_id: String,
    pub server_id: String,
    pub name: String,
    pub channel_type: Option<String>,
    pub voice_users_online_count: i64,
    pub last_message_id: Option<String>,
    pub last_message_at: Option<String>,
}

impl ChannelRow {
    pub fn kind(&self) -> ChannelKind {
        ChannelKind::from_column(self.channel_type.as_deref())
    }
}

/// Channel type. Rows with no type recorded are text channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Text,
    Voice,
}

impl ChannelKind {
    pub fn from_column(value: Option<&str>) -> Self {
        match value {
            Some("voice") => ChannelKind::Voice,
            _ => ChannelKind::Text,
        }
    }
}

/// The newest message of a channel, as kept in the channel cache columns.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LastMessageRow {
    pub message_id: String,
    pub created_at: String,
}

/// A message joined with the channel and server it was posted in.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserMessageRow {
    pub disc_id: String,
    pub text: String,
    pub channel_name: String,
    pub channel_disc_id: String,
    pub server_name: String,
    pub server_disc_id: String,
}

/// One group of a `GROUP BY` bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct BucketCountRow {
    pub bucket: i64,
    pub count: i64,
}
