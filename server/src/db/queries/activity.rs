use sqlx::SqlitePool;

use crate::db::models::BucketCountRow;
use crate::db::queries::messages::MessageScope;

/// Message counts grouped by weekday, `0` = Sunday as in SQLite's `%w`.
/// Weekdays without messages are absent.
pub async fn counts_by_weekday(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
) -> Result<Vec<BucketCountRow>, sqlx::Error> {
    counts_by(pool, scope, "%w").await
}

/// Message counts grouped by hour of day (`0..=23`). Hours without
/// messages are absent.
pub async fn counts_by_hour(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
) -> Result<Vec<BucketCountRow>, sqlx::Error> {
    counts_by(pool, scope, "%H").await
}

async fn counts_by(
    pool: &SqlitePool,
    scope: MessageScope<'_>,
    format: &'static str,
) -> Result<Vec<BucketCountRow>, sqlx::Error> {
    let sql = format!(
        "SELECT CAST(strftime('{format}', m.created_at) AS INTEGER) AS bucket, COUNT(*) AS count \
         {} \
         GROUP BY bucket \
         ORDER BY bucket",
        scope.from_clause()
    );
    sqlx::query_as::<_, BucketCountRow>(&sql)
        .bind(scope.id())
        .fetch_all(pool)
        .await
}
