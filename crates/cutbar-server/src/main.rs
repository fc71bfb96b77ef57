//! # cutbar-server
//!
//! REST backend for the CUTBAR FINANCE community chat and board.
//!
//! This binary provides:
//! - **Chat stream**: list the latest messages oldest-first, post new ones
//! - **Board**: posts with likes and comment counts, post detail with
//!   comments, commenting and liking
//! - **Users**: registration and lookup (no sessions; a user id is enough)
//!
//! The front end polls the listing endpoints; nothing is pushed.

mod api;
mod config;
mod error;
mod extract;
mod present;
mod seed;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cutbar_shared::constants::APP_NAME;
use cutbar_store::{Database, MemoryStorage, Storage};

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cutbar_server=debug")),
        )
        .init();

    info!("Starting {} server v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the store
    // -----------------------------------------------------------------------
    let storage = open_storage(&config)?;

    if config.seed_demo_user {
        seed::ensure_demo_user(storage.as_ref())?;
    }

    let app_state = AppState {
        storage,
        config: Arc::new(config.clone()),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

fn open_storage(config: &ServerConfig) -> anyhow::Result<Arc<dyn Storage>> {
    if config.in_memory() {
        info!("Using in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    Ok(Arc::new(Database::open_at(&config.database_path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_sqlite_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            database_path: dir.path().join("cutbar.db"),
            ..ServerConfig::default()
        };

        let storage = open_storage(&config).unwrap();
        let user = seed::ensure_demo_user(storage.as_ref()).unwrap();
        assert!(dir.path().join("cutbar.db").exists());

        // A second handle on the same file sees the seeded user.
        let reopened = open_storage(&config).unwrap();
        assert_eq!(seed::ensure_demo_user(reopened.as_ref()).unwrap(), user);
    }

    #[test]
    fn memory_path_selects_memory_store() {
        let config = ServerConfig {
            database_path: config::IN_MEMORY.into(),
            ..ServerConfig::default()
        };
        let storage = open_storage(&config).unwrap();
        storage.health_check().unwrap();
    }
}
