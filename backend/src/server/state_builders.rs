//! Startup wiring for the user store and HTTP state.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::InMemoryUserRepository;
use user_service::outbound::persistence::{DbPool, DieselUserRepository, run_migrations};
use user_service::settings::ServerSettings;

/// Apply migrations and open the pool when a database URL is configured.
///
/// Returns `Ok(None)` when no URL is set so the caller falls back to the
/// in-memory store.
///
/// # Errors
/// Returns [`io::Error`] when migrations fail or the pool cannot be built.
pub async fn connect_database(settings: &ServerSettings) -> io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; users are kept in memory and lost on exit");
        return Ok(None);
    };

    if settings.run_migrations {
        let url = database_url.clone();
        let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
        info!(applied, "database migrations applied");
    }

    let config = settings.pool_config(database_url);
    let (max_size, min_idle) = (config.max_size(), config.min_idle());
    let pool = DbPool::new(config).await.map_err(io::Error::other)?;
    info!(max_size, ?min_idle, "database pool ready");
    Ok(Some(pool))
}

/// Build handler state over the Diesel repository, or memory without a pool.
pub fn build_http_state(pool: Option<DbPool>) -> HttpState {
    match pool {
        Some(pool) => HttpState::from_repository(Arc::new(DieselUserRepository::new(pool))),
        None => HttpState::from_repository(Arc::new(InMemoryUserRepository::new())),
    }
}
