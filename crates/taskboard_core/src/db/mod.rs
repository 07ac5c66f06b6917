//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Build pooled SQLite connections for taskboard core.
//! - Create the `tasks` table before any repository touches it.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON` and a busy timeout.
//! - In-memory pools hold exactly one long-lived connection, so all callers
//!   observe the same database.

use thiserror::Error;

mod open;
pub mod schema;

pub use open::{open_pool, open_pool_in_memory, PoolOptions};

/// Shared pool of SQLite connections.
pub type ConnectionPool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}
