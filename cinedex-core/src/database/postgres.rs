use std::fmt;
use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

/// Upper bound for the liveness probe issued while opening the pool.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound for every individual catalog read.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Pool sizing and the time bounds applied to storage calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// Statistics about the connection pool
#[derive(Debug, Clone)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub max_size: u32,
}

/// Process-wide handle to the catalog database.
///
/// Cloning is cheap and shares the underlying pool; the pool owns all
/// synchronisation, so repositories use it without additional locking.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    query_timeout: Duration,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl PostgresDatabase {
    /// Opens the pool and proves the server answers within
    /// `settings.connect_timeout`. No handle is returned otherwise.
    pub async fn connect(
        connection_string: &str,
        settings: &PoolSettings,
    ) -> Result<Self> {
        let connect_options = Self::build_connect_options(connection_string)?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .test_before_acquire(true)
            .connect_lazy_with(connect_options);

        let db = Self {
            pool,
            query_timeout: settings.query_timeout,
        };
        db.ping(settings.connect_timeout).await?;

        info!(
            max_connections = settings.max_connections,
            query_timeout_ms = settings.query_timeout.as_millis() as u64,
            "Database pool initialized"
        );

        Ok(db)
    }

    /// Wraps an existing pool, e.g. the one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Liveness probe: `SELECT 1` must complete within `limit`.
    pub async fn ping(&self, limit: Duration) -> Result<()> {
        let probe = async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(|e| CatalogError::Connection(e.to_string()))
        };

        match tokio::time::timeout(limit, probe).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Connection(format!(
                "liveness probe did not complete within {}ms",
                limit.as_millis()
            ))),
        }
    }

    /// Apply the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        info!("Catalog schema is up to date");
        Ok(())
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle() as u32,
            max_size: self.pool.options().get_max_connections(),
        }
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }

    fn build_connect_options(
        connection_string: &str,
    ) -> Result<PgConnectOptions> {
        let trimmed = connection_string.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Connection(
                "PostgreSQL connection string is empty".to_string(),
            ));
        }

        trimmed.parse::<PgConnectOptions>().map_err(|e| {
            CatalogError::Connection(format!(
                "Invalid PostgreSQL connection string: {}",
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_settings_default_to_catalog_bounds() {
        let settings = PoolSettings::default();
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
        assert_eq!(settings.query_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[tokio::test]
    async fn empty_connection_string_is_a_connection_error() {
        let err = PostgresDatabase::connect("   ", &PoolSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Connection(_)));
    }

    #[tokio::test]
    async fn malformed_connection_string_is_rejected_before_dialing() {
        let err = PostgresDatabase::connect(
            "postgres://user@localhost:notaport/movies",
            &PoolSettings::default(),
        )
        .await
        .unwrap_err();

        match err {
            CatalogError::Connection(message) => {
                assert!(message.contains("Invalid PostgreSQL connection"))
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_fails_the_open() {
        // Nothing listens on the discard port; the probe must fail fast
        // rather than hand back a pool.
        let settings = PoolSettings {
            connect_timeout: Duration::from_millis(500),
            ..PoolSettings::default()
        };
        let err = PostgresDatabase::connect(
            "postgres://cinedex@127.0.0.1:9/movies",
            &settings,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatalogError::Connection(_)));
    }
}
