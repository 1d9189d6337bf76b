//! Backend entry-point: loads settings, prepares the record store and
//! serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
#[cfg(feature = "metrics")]
use server::make_metrics;
use server::{ServerConfig, ServerSettings, create_server};

/// Connect to PostgreSQL, applying migrations first when enabled.
async fn connect_database(
    settings: &ServerSettings,
    database_url: &str,
) -> std::io::Result<DbPool> {
    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
    }
    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
    DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(bind_addr).with_sample_users(settings.seed_sample_users());
    match settings.database_url.as_deref() {
        Some(url) => {
            config = config.with_db_pool(connect_database(&settings, url).await?);
            info!("using PostgreSQL user store");
        }
        None => warn!("no database configured; users are kept in memory"),
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "listening");
    server.await
}
