use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Top-level service configuration, loaded from chatstats.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub rate_limit: RateLimitSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub web_address: String,
    /// Directory holding `index.html` for the landing page.
    pub static_dir: String,
    /// Origin allowed by CORS. Any origin is allowed while this is localhost.
    pub public_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            web_address: "0.0.0.0:8080".into(),
            static_dir: "static".into(),
            public_url: "http://localhost:8080".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite:chatstats.db?mode=rwc".into(),
            max_connections: 5,
        }
    }
}

/// Per-IP token bucket applied to the stats endpoints.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RateLimitSection {
    /// Burst capacity.
    pub burst: u32,
    /// Seconds to refill one token.
    pub refill_seconds: f64,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            burst: 60,
            refill_seconds: 1.0,
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file. Falls back to defaults if the file doesn't exist.
    /// Environment variables override TOML values.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path}"))?;
            Self::parse(&contents).with_context(|| format!("failed to parse config file {path}"))?
        } else {
            info!("No config file found at {}, using defaults", path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("WEB_ADDRESS") {
            self.server.web_address = v;
        }
        if let Some(v) = var("STATIC_DIR") {
            self.server.static_dir = v;
        }
        if let Some(v) = var("PUBLIC_URL") {
            self.server.public_url = v;
        }
        if let Some(v) = var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS")
            && let Ok(n) = v.parse()
        {
            self.database.max_connections = n;
        }
    }
}
