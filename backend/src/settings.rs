//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_SERVICE_*` environment variables and
//! configuration files. The database URL additionally falls back to the
//! conventional `DATABASE_URL` variable.

use std::env;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig};

/// Environment variable consulted when no database URL is configured.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

/// Settings controlling the HTTP listener and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Apply embedded migrations on startup. Files and environment only.
    #[ortho_config(default = true, skip_cli)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Host and port to bind, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Resolve the database URL from settings or `DATABASE_URL`.
    ///
    /// Blank values are treated as unset. Returns `None` when neither source
    /// provides a URL, in which case the in-memory store is used.
    pub fn database_url(&self) -> Option<String> {
        resolve_database_url(self.database_url.as_deref(), env::var(DATABASE_URL_ENV).ok())
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn resolve_database_url(configured: Option<&str>, fallback: Option<String>) -> Option<String> {
    configured
        .and_then(non_blank)
        .or_else(|| fallback.as_deref().and_then(non_blank))
}
