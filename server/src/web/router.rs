use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

use super::app_state::AppState;
use super::rate_limit::{RateLimiter, api_rate_limit};
use super::rest_api;

/// Build the axum router with every dashboard route.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Restrict CORS to the configured public_url origin (or allow any for localhost dev)
    let public_url = &state.public_url;
    let cors = if public_url.contains("localhost") || public_url.contains("127.0.0.1") {
        CorsLayer::new().allow_origin(Any).allow_methods([Method::GET])
    } else {
        let origin = public_url
            .parse::<HeaderValue>()
            .unwrap_or_else(|_| HeaderValue::from_static("https://localhost"));
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET])
    };

    let limiter = Arc::new(RateLimiter::new(
        state.rate_limit_burst,
        state.rate_limit_refill_seconds,
    ));

    let api_routes = Router::new()
        .route("/servers/", get(rest_api::list_server_stats))
        .route("/servers", get(rest_api::list_server_stats))
        .route("/channels/{server_id}/", get(rest_api::list_channel_stats))
        .route("/channels/{server_id}", get(rest_api::list_channel_stats))
        .route("/users/{user_id}/messages", get(rest_api::list_user_messages))
        .layer(axum::middleware::from_fn(api_rate_limit));

    Router::new()
        .merge(api_routes)
        .route("/health", get(rest_api::health))
        .route_service("/", ServeFile::new(state.static_dir.join("index.html")))
        .layer(cors)
        .layer(axum::Extension(limiter))
        .with_state(state)
}
