use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::{ChannelKind, ChannelRow};
use crate::db::queries::messages::{self, MessageScope};
use crate::db::queries::{channels, servers};
use crate::db::timestamps::to_db_time;

use super::histogram::{ActivityHistogram, activity_histogram};
use super::{DateInfo, StatsError, parse_stored};

/// Dashboard summary of one channel. Message-derived fields are absent for
/// voice channels; the histograms only appear when requested.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStats {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_messages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages_last_hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages_last_week: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<DateInfo>,
    pub voice_users_online_count: i64,
    #[serde(flatten)]
    pub activity: Option<ActivityHistogram>,
}

/// Compute the statistics of one channel, or `None` when a text channel has
/// at most one message.
///
/// Refreshes the channel's last-message cache before anything else is read.
pub async fn channel_stats(
    pool: &SqlitePool,
    channel: &ChannelRow,
    graph_info: bool,
    now: DateTime<Utc>,
) -> Result<Option<ChannelStats>, StatsError> {
    let mut stats = ChannelStats {
        id: channel.disc_id.clone(),
        kind: channel.kind(),
        name: channel.name.clone(),
        total_messages: None,
        messages_last_hour: None,
        messages_last_week: None,
        last_message: None,
        voice_users_online_count: channel.voice_users_online_count,
        activity: None,
    };

    if stats.kind == ChannelKind::Voice {
        return Ok(Some(stats));
    }

    let Some(last) = channels::refresh_last_message(pool, &channel.id).await? else {
        debug!(channel = %channel.disc_id, "skipping channel without messages");
        return Ok(None);
    };

    let scope = MessageScope::Channel(&channel.id);
    let total = messages::count_messages(pool, scope, None).await?;
    if total <= 1 {
        debug!(channel = %channel.disc_id, total, "skipping channel with too few messages");
        return Ok(None);
    }

    let hour_ago = to_db_time(now - Duration::hours(1));
    let week_ago = to_db_time(now - Duration::weeks(1));

    stats.total_messages = Some(total);
    stats.messages_last_hour = Some(messages::count_messages(pool, scope, Some(&hour_ago)).await?);
    stats.messages_last_week = Some(messages::count_messages(pool, scope, Some(&week_ago)).await?);
    stats.last_message = Some(DateInfo::new(parse_stored(&last.created_at)?, now));
    if graph_info {
        stats.activity = Some(activity_histogram(pool, scope, now).await?);
    }
    Ok(Some(stats))
}

/// Statistics of every reportable channel of a server, keyed by channel
/// platform id. Channels with nothing to report are left out.
pub async fn server_channel_stats(
    pool: &SqlitePool,
    server_disc_id: &str,
    graph_info: bool,
    now: DateTime<Utc>,
) -> Result<BTreeMap<String, ChannelStats>, StatsError> {
    let server = servers::get_server_by_disc_id(pool, server_disc_id)
        .await?
        .ok_or_else(|| StatsError::ServerNotFound(server_disc_id.to_string()))?;

    let mut out = BTreeMap::new();
    for channel in channels::list_channels(pool, &server.id).await? {
        if let Some(stats) = channel_stats(pool, &channel, graph_info, now).await? {
            out.insert(stats.id.clone(), stats);
        }
    }
    Ok(out)
}
