//! PostgreSQL pool for the catalog tables.
//!
//! Connection settings come from [`DatabaseConfig`]; the URL is parsed into
//! typed [`PgConnectOptions`] up front, so a malformed URL is reported as a
//! configuration error and the password never reaches the logs.

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use storehub_core::config::DatabaseConfig;
use storehub_core::error::{AppError, ErrorKind};
use storehub_core::result::AppResult;

/// Shared sqlx pool serving every `PgRepository`.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
    ping_timeout: Duration,
}

impl DatabasePool {
    /// Open the pool and wait for the first connection.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(config)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            user = options.get_username(),
            max_connections = config.max_connections,
            "Opening catalog pool"
        );

        let pool = pool_options(config)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Persistence,
                    format!("Catalog database unreachable: {e}"),
                    e,
                )
            })?;

        Ok(Self::from_pool(pool, config))
    }

    pub(crate) fn from_pool(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            ping_timeout: Duration::from_secs(config.connect_timeout_seconds),
        }
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip `SELECT 1` and report how long it took.
    ///
    /// Fails with `Persistence` when the query errors or does not answer
    /// within the configured connect timeout.
    pub async fn ping(&self) -> AppResult<Duration> {
        let started = Instant::now();
        let round_trip = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool);

        match tokio::time::timeout(self.ping_timeout, round_trip).await {
            Ok(Ok(_)) => Ok(started.elapsed()),
            Ok(Err(e)) => Err(AppError::with_source(
                ErrorKind::Persistence,
                "Catalog database did not answer",
                e,
            )),
            Err(_) => Err(AppError::persistence(format!(
                "Catalog database did not answer within {}s",
                self.ping_timeout.as_secs()
            ))),
        }
    }

    /// Drain and close every connection.
    pub async fn close(&self) {
        let open = self.pool.size();
        self.pool.close().await;
        if open > 0 {
            info!(connections = open, "Catalog pool closed");
        } else {
            warn!("Catalog pool closed with no open connections");
        }
    }
}

/// Typed connection options parsed from `config.url`.
pub fn connect_options(config: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    PgConnectOptions::from_str(&config.url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}

/// Pool sizing and timeouts from the `[database]` section.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}
