//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Read `TASKBOARD_*` variables (after loading an optional `.env`).
//! - Resolve defaults so callers always receive a complete config.
//!
//! # Invariants
//! - `log_dir` is always absolute.
//! - `pool_size` is always greater than zero.

use crate::logging::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DB_PATH: &str = "TASKBOARD_DB_PATH";
pub const ENV_HOST: &str = "TASKBOARD_HOST";
pub const ENV_PORT: &str = "TASKBOARD_PORT";
pub const ENV_LOG_LEVEL: &str = "TASKBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKBOARD_LOG_DIR";
pub const ENV_POOL_SIZE: &str = "TASKBOARD_POOL_SIZE";

/// Value of `TASKBOARD_DB_PATH` that selects an in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

const DEFAULT_DB_PATH: &str = "./tasks.db";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("cannot resolve current directory: {0}")]
    CurrentDir(String),
}

/// Where task rows are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbLocation,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub pool_size: u32,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db = match read(ENV_DB_PATH) {
            Some(value) if value == IN_MEMORY_DB => DbLocation::InMemory,
            Some(value) => DbLocation::File(PathBuf::from(value)),
            None => DbLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let host = match read(ENV_HOST) {
            Some(value) => value.parse::<IpAddr>().map_err(|err| ConfigError::Invalid {
                var: ENV_HOST,
                value: value.clone(),
                reason: err.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match read(ENV_PORT) {
            Some(value) => value.parse::<u16>().map_err(|err| ConfigError::Invalid {
                var: ENV_PORT,
                value: value.clone(),
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let pool_size = match read(ENV_POOL_SIZE) {
            Some(value) => match value.parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_POOL_SIZE,
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(size) => size,
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_POOL_SIZE,
                        value,
                        reason: err.to_string(),
                    });
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => PathBuf::from(value),
            None => PathBuf::from("logs"),
        };
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            std::env::current_dir()
                .map_err(|err| ConfigError::CurrentDir(err.to_string()))?
                .join(log_dir)
        };

        Ok(Self {
            db,
            bind_addr: SocketAddr::new(host, port),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
            pool_size,
        })
    }
}
