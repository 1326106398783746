//! Backend entry point: settings, storage, migrations and the HTTP server.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use postms::inbound::http::health::HealthState;
use postms::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::from_env()?;
    let mut config = ServerConfig::new(settings.bind_addr());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url, settings.connect_retry())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(settings.pool_config(database_url))
            .await
            .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))?;
        config = config.with_db_pool(pool);
    }

    let (host, port) = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%host, port, "postms listening");
    server.await
}
