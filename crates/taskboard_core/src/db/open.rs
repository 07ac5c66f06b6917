//! Connection pool bootstrap for SQLite.
//!
//! # Responsibility
//! - Build file or in-memory r2d2 pools.
//! - Configure pragmas on every connection the pool hands out.
//! - Create the task schema before returning a usable pool.
//!
//! # Invariants
//! - Returned pools have the `tasks` table in place.
//! - In-memory pools never recycle their single connection.

use super::schema::ensure_schema;
use super::{ConnectionPool, DbResult};
use log::{error, info};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing options for file-backed databases.
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    /// Maximum number of simultaneously open connections.
    pub max_size: u32,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self { max_size: 8 }
    }
}

#[derive(Debug)]
struct PragmaCustomizer;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)
    }
}

/// Opens a pool over a SQLite database file and creates the schema.
///
/// # Side effects
/// - Creates the database file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>, options: PoolOptions) -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let manager = SqliteConnectionManager::file(path.as_ref());
    let built = r2d2::Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(PragmaCustomizer))
        .build(manager);

    finish_open(built, "file", started_at)
}

/// Opens a single-connection in-memory pool and creates the schema.
///
/// Every checkout returns the same connection, so data survives for the
/// lifetime of the pool.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool_in_memory() -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let built = r2d2::Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(PragmaCustomizer))
        .build(SqliteConnectionManager::memory());

    finish_open(built, "memory", started_at)
}

fn finish_open(
    built: Result<ConnectionPool, r2d2::Error>,
    mode: &str,
    started_at: Instant,
) -> DbResult<ConnectionPool> {
    let pool = match built {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_pool(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_pool(pool: &ConnectionPool) -> DbResult<()> {
    let conn = pool.get()?;
    ensure_schema(&conn)
}
