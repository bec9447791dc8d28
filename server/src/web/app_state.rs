use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::config::AppConfig;

/// Shared state handed to every handler.
pub struct AppState {
    pub db: SqlitePool,
    /// Directory served for the landing page.
    pub static_dir: PathBuf,
    /// Origin allowed by CORS.
    pub public_url: String,
    pub rate_limit_burst: u32,
    pub rate_limit_refill_seconds: f64,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db,
            static_dir: PathBuf::from(&config.server.static_dir),
            public_url: config.server.public_url.clone(),
            rate_limit_burst: config.rate_limit.burst,
            rate_limit_refill_seconds: config.rate_limit.refill_seconds,
        }
    }
}
