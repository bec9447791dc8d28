use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatstats_server::config::AppConfig;
use chatstats_server::db::pool::{create_pool, run_migrations};
use chatstats_server::web::app_state::AppState;
use chatstats_server::web::router::build_router;

/// Read-only activity statistics API for chat servers.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "chatstats.toml")]
    config: String,

    /// Listen address, overriding the config file.
    #[arg(long)]
    web_address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(addr) = cli.web_address {
        config.server.web_address = addr;
    }

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let app = build_router(Arc::new(AppState::new(pool, &config)));

    let web_addr = &config.server.web_address;
    let listener = tokio::net::TcpListener::bind(web_addr)
        .await
        .with_context(|| format!("failed to bind {web_addr}"))?;
    info!("Chatstats listening on {}", web_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await
    .context("server error")?;
    Ok(())
}
