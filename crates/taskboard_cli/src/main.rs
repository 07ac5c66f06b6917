//! Server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open storage, then serve HTTP.
//! - Shut down gracefully on Ctrl-C.

use std::process::ExitCode;

use taskboard_api::{create_router, AppState};
use taskboard_core::db::{open_pool, open_pool_in_memory, PoolOptions};
use taskboard_core::{init_logging, AppConfig, DbLocation, EventLog, SqliteTaskRepository};
use tokio::net::TcpListener;

const CLI_LOG: EventLog = EventLog::new("cli");

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            // Logging is not configured yet.
            eprintln!("taskboard: configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("taskboard: logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            CLI_LOG.failure("server_exit", format_args!("error={message}"));
            log::logger().flush();
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), String> {
    let pool = match &config.db {
        DbLocation::File(path) => open_pool(
            path,
            PoolOptions {
                max_size: config.pool_size,
            },
        ),
        DbLocation::InMemory => open_pool_in_memory(),
    }
    .map_err(|err| format!("failed to open database: {err}"))?;

    let repository = SqliteTaskRepository::try_new(pool)
        .map_err(|err| format!("task storage is unusable: {err}"))?;
    let router = create_router(AppState::new(repository));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| format!("failed to bind {}: {err}", config.bind_addr))?;
    CLI_LOG.ok(
        "server_start",
        format_args!(
            "addr={} version={}",
            config.bind_addr,
            taskboard_core::core_version()
        ),
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {err}"))?;

    CLI_LOG.ok("server_stop", format_args!(""));
    log::logger().flush();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        CLI_LOG.failure("shutdown_signal", format_args!("error={err}"));
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
