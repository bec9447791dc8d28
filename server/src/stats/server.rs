use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::ServerRow;
use crate::db::queries::messages::{self, MessageScope};
use crate::db::queries::servers;
use crate::db::timestamps::to_db_time;

use super::histogram::{ActivityHistogram, activity_histogram};
use super::{DateInfo, StatsError, parse_stored};

/// Dashboard summary of one server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerStats {
    pub id: String,
    pub name: String,
    pub total_members: i64,
    pub total_messages: i64,
    pub members_joined_per_day_avg: f64,
    pub channel_count: i64,
    pub members_joined_last_24h: i64,
    pub messages_last_hour: i64,
    pub last_message: DateInfo,
    #[serde(flatten)]
    pub activity: ActivityHistogram,
}

/// Whole days since `first_joined`, at least one so a server created today
/// still has a defined join rate.
pub fn days_since(first_joined: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - first_joined).num_days().max(1)
}

/// Compute the statistics of one server.
///
/// Fails with [`StatsError::NoMembers`] when the server has no members and
/// [`StatsError::NoMessages`] when none of its channels has a message.
pub async fn server_stats(
    pool: &SqlitePool,
    server: &ServerRow,
    now: DateTime<Utc>,
) -> Result<ServerStats, StatsError> {
    let scope = MessageScope::Server(&server.id);

    let total_members = servers::count_members(pool, &server.id).await?;
    let first_joined = servers::first_member_joined_at(pool, &server.id)
        .await?
        .ok_or_else(|| StatsError::NoMembers(server.disc_id.clone()))?;
    let first_joined = parse_stored(&first_joined)?;
    let members_joined_per_day_avg = total_members as f64 / days_since(first_joined, now) as f64;

    let last_message = messages::last_message_at(pool, scope)
        .await?
        .ok_or_else(|| StatsError::NoMessages(server.disc_id.clone()))?;
    let last_message = parse_stored(&last_message)?;

    let day_ago = to_db_time(now - Duration::days(1));
    let hour_ago = to_db_time(now - Duration::hours(1));

    let stats = ServerStats {
        id: server.disc_id.clone(),
        name: server.name.clone(),
        total_members,
        total_messages: messages::count_messages(pool, scope, None).await?,
        members_joined_per_day_avg,
        channel_count: servers::count_channels(pool, &server.id).await?,
        members_joined_last_24h: servers::count_members_joined_since(pool, &server.id, &day_ago)
            .await?,
        messages_last_hour: messages::count_messages(pool, scope, Some(&hour_ago)).await?,
        last_message: DateInfo::new(last_message, now),
        activity: activity_histogram(pool, scope, now).await?,
    };

    debug!(
        server = %server.disc_id,
        members = stats.total_members,
        messages = stats.total_messages,
        "computed server stats"
    );
    Ok(stats)
}

/// Statistics of every server, keyed by platform id. One failing server
/// fails the whole map.
pub async fn all_server_stats(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<BTreeMap<String, ServerStats>, StatsError> {
    let mut out = BTreeMap::new();
    for server in servers::list_servers(pool).await? {
        let stats = server_stats(pool, &server, now).await?;
        out.insert(server.disc_id, stats);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{
        add_member, insert_channel, insert_message, insert_server, insert_user, setup_db,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_days_since_floors_to_one() {
        let n = now();
        assert_eq!(days_since(n - Duration::hours(3), n), 1);
        assert_eq!(days_since(n - Duration::days(10), n), 10);
        assert_eq!(days_since(n - Duration::hours(36), n), 1);
    }

    #[tokio::test]
    async fn test_server_stats_counts() {
        let pool = setup_db().await;
        let server = insert_server(&pool, "1001", "Rustaceans").await;
        let general = insert_channel(&pool, &server, "c1", "general", None).await;
        let random = insert_channel(&pool, &server, "c2", "random", None).await;
        insert_channel(&pool, &server, "c3", "lounge", Some("voice")).await;

        let mut users = Vec::new();
        for (i, joined) in [
            "2024-05-31 12:00:00",
            "2024-06-05 09:00:00",
            "2024-06-09 18:00:00",
            "2024-06-10 08:00:00",
        ]
        .iter()
        .enumerate()
        {
            let user = insert_user(&pool, &format!("u{i}"), &format!("user{i}")).await;
            add_member(&pool, &server, &user, joined).await;
            users.push(user);
        }

        insert_message(&pool, &general, &users[0], "a", "2024-06-01 10:00:00").await;
        insert_message(&pool, &general, &users[1], "b", "2024-06-10 11:30:00").await;
        insert_message(&pool, &random, &users[2], "c", "2024-06-10 11:45:00").await;

        let row = servers::get_server_by_disc_id(&pool, "1001").await.unwrap().unwrap();
        let stats = server_stats(&pool, &row, now()).await.unwrap();

        assert_eq!(stats.id, "1001");
        assert_eq!(stats.name, "Rustaceans");
        assert_eq!(stats.total_members, 4);
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.channel_count, 3);
        // First join 10 days before now
        assert_eq!(stats.members_joined_per_day_avg, 0.4);
        assert_eq!(stats.members_joined_last_24h, 2);
        assert_eq!(stats.messages_last_hour, 2);
        assert_eq!(
            stats.last_message.date,
            Utc.with_ymd_and_hms(2024, 6, 10, 11, 45, 0).unwrap()
        );
        assert_eq!(stats.last_message.date_text, "15 minutes ago");

        let hod_hits = stats.activity.mph_by_hod.iter().filter(|r| **r > 0.0).count();
        assert_eq!(hod_hits, 2, "messages at 10h and 11h");
    }

    #[tokio::test]
    async fn test_server_stats_with_mixed_timestamp_styles() {
        let pool = setup_db().await;
        let server = insert_server(&pool, "1001", "Rustaceans").await;
        let user = insert_user(&pool, "u1", "alice").await;
        add_member(&pool, &server, &user, "2024-06-01T12:00:00Z").await;
        let channel = insert_channel(&pool, &server, "c1", "general", None).await;
        insert_message(&pool, &channel, &user, "a", "2024-06-10T09:00:00Z").await;
        insert_message(&pool, &channel, &user, "b", "2024-06-10 11:30:00").await;

        let row = servers::get_server_by_disc_id(&pool, "1001").await.unwrap().unwrap();
        let stats = server_stats(&pool, &row, now()).await.unwrap();
        assert_eq!(stats.messages_last_hour, 1);
        assert_eq!(
            stats.last_message.date,
            Utc.with_ymd_and_hms(2024, 6, 10, 11, 30, 0).unwrap()
        );
        assert_eq!(stats.members_joined_per_day_avg, 1.0 / 9.0);
    }

    #[tokio::test]
    async fn test_server_without_members_fails() {
        let pool = setup_db().await;
        insert_server(&pool, "1001", "Empty").await;
        let row = servers::get_server_by_disc_id(&pool, "1001").await.unwrap().unwrap();

        let err = server_stats(&pool, &row, now()).await.unwrap_err();
        assert!(matches!(err, StatsError::NoMembers(ref id) if id == "1001"));
    }

    #[tokio::test]
    async fn test_server_without_messages_fails() {
        let pool = setup_db().await;
        let server = insert_server(&pool, "1001", "Quiet").await;
        let user = insert_user(&pool, "u1", "alice").await;
        add_member(&pool, &server, &user, "2024-06-01 00:00:00").await;
        insert_channel(&pool, &server, "c1", "general", None).await;
        let row = servers::get_server_by_disc_id(&pool, "1001").await.unwrap().unwrap();

        let err = server_stats(&pool, &row, now()).await.unwrap_err();
        assert!(matches!(err, StatsError::NoMessages(_)));
    }

    #[tokio::test]
    async fn test_all_server_stats_keyed_by_disc_id() {
        let pool = setup_db().await;
        for (disc, name) in [("a1", "Alpha"), ("b2", "Beta")] {
            let server = insert_server(&pool, disc, name).await;
            let user = insert_user(&pool, &format!("u-{disc}"), name).await;
            add_member(&pool, &server, &user, "2024-06-01 00:00:00").await;
            let channel = insert_channel(&pool, &server, &format!("c-{disc}"), "general", None).await;
            insert_message(&pool, &channel, &user, "hi", "2024-06-09 00:00:00").await;
        }

        let all = all_server_stats(&pool, now()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a1"].name, "Alpha");
        assert_eq!(all["b2"].total_messages, 1);
    }
}
