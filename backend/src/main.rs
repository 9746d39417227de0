//! User service entry-point: loads settings, wires the user store and serves
//! the REST endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_service::inbound::http::health::HealthState;
use user_service::settings::ServerSettings;

use server::{ServerConfig, connect_database, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let (host, port) = settings.bind_addr();
    let config =
        ServerConfig::new(host, port).with_db_pool(connect_database(&settings).await?);

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
