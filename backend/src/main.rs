//! Fitness server entry-point: loads settings, prepares the database and
//! serves the pages and JSON endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, prepare_database};
use backend::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = settings.session_key().map_err(std::io::Error::other)?;

    let database_path = settings.database_path();
    prepare_database(&database_path).map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(&database_path))
        .await
        .map_err(std::io::Error::other)?;
    info!(path = %database_path.display(), "database ready");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure, bind_addr, pool);
    let server = create_server(health_state, config)?;
    server.await
}
