use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use crate::stats::channel::{ChannelStats, server_channel_stats};
use crate::stats::server::{ServerStats, all_server_stats};
use crate::stats::users::{UserMessage, user_messages};
use crate::stats::StatsError;

use super::app_state::AppState;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StatsError::ServerNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            StatsError::NoMembers(_) | StatsError::NoMessages(_) => {
                error!(error = %self, "statistics undefined");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            StatsError::BadTimestamp { .. } => {
                error!(error = %self, "corrupt timestamp in store");
                (StatusCode::INTERNAL_SERVER_ERROR, "Corrupt stored data".to_string())
            }
            StatsError::Database(e) => {
                error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Accept the usual spellings of a boolean query flag; anything else is false.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelStatsParams {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub graph_info: bool,
}

/// GET /servers/ — statistics of every server.
pub async fn list_server_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, ServerStats>>, StatsError> {
    Ok(Json(all_server_stats(&state.db, Utc::now()).await?))
}

/// GET /channels/{server_id}/ — statistics of a server's channels.
pub async fn list_channel_stats(
    State(state): State<Arc<AppState>>,
    Path(server_id): Path<String>,
    Query(params): Query<ChannelStatsParams>,
) -> Result<Json<BTreeMap<String, ChannelStats>>, StatsError> {
    let stats = server_channel_stats(&state.db, &server_id, params.graph_info, Utc::now()).await?;
    Ok(Json(stats))
}

/// GET /users/{user_id}/messages — every message a user posted.
pub async fn list_user_messages(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<BTreeMap<String, UserMessage>>, StatsError> {
    Ok(Json(user_messages(&state.db, &user_id).await?))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
