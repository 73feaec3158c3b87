//! Database connection provider
//!
//! Owns the single PostgreSQL pool shared by every request. The pool is
//! opened and pinged on the first `acquire()`; a failed attempt is not
//! cached, so the next call tries again. Once established the pool is
//! handed out without re-checking liveness.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use tokio::sync::OnceCell;

use super::DbError;

/// Default maximum connections for the pool.
/// Kept low; each request issues at most one statement.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Lazily initialised, cached access to the PostgreSQL pool.
///
/// Construct it once at startup and inject it where it is needed. First-use
/// initialisation runs behind a once-cell, so concurrent callers wait for a
/// single attempt instead of each opening their own pool.
#[derive(Debug)]
pub struct ConnectionProvider {
    database_url: String,
    max_connections: u32,
    pool: OnceCell<PgPool>,
}

impl ConnectionProvider {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already-open pool (tests, embedding in another server).
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            database_url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    /// Whether a pool has been established yet
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Return the shared pool, opening and pinging it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the pool cannot be opened or the
    /// ping fails. Nothing is cached in that case.
    pub async fn acquire(&self) -> Result<PgPool, DbError> {
        let pool = self
            .pool
            .get_or_try_init(|| connect(&self.database_url, self.max_connections))
            .await?;
        Ok(pool.clone())
    }
}

/// Open a pool and verify the server answers.
///
/// A single connection is opened and pinged first so an unreachable server
/// or bad credentials report their own error instead of a pool timeout.
async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DbError> {
    tracing::info!(max_connections, "Connecting to database");

    let options: PgConnectOptions = database_url.parse().map_err(DbError::Connection)?;

    let mut conn = PgConnection::connect_with(&options)
        .await
        .map_err(DbError::Connection)?;
    conn.ping().await.map_err(DbError::Connection)?;
    if let Err(e) = conn.close().await {
        tracing::debug!("closing ping connection failed: {}", e);
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(DbError::Connection)?;

    tracing::info!("Database connection established");
    Ok(pool)
}
