//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use cutbar_shared::constants::{DEFAULT_HTTP_PORT, DEFAULT_MESSAGE_LIMIT, DEFAULT_POST_LIMIT};

/// `DATABASE_PATH` value that selects the in-process store.
pub const IN_MEMORY: &str = ":memory:";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:5000`
    pub http_addr: SocketAddr,

    /// SQLite database file. `:memory:` keeps everything in process.
    /// Env: `DATABASE_PATH`
    /// Default: `./cutbar.db`
    pub database_path: PathBuf,

    /// How many chat messages the listing returns.
    /// Env: `MESSAGE_LIMIT`
    pub message_limit: u32,

    /// How many posts the board listing returns.
    /// Env: `POST_LIMIT`
    pub post_limit: u32,

    /// Create the demo user at startup if it does not exist.
    /// Env: `SEED_DEMO_USER` (true/false)
    /// Default: `true`
    pub seed_demo_user: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            database_path: PathBuf::from("./cutbar.db"),
            message_limit: DEFAULT_MESSAGE_LIMIT,
            post_limit: DEFAULT_POST_LIMIT,
            seed_demo_user: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(path) = var("DATABASE_PATH") {
            if !path.is_empty() {
                config.database_path = PathBuf::from(path);
            }
        }

        if let Some(val) = var("MESSAGE_LIMIT") {
            config.message_limit = parse_limit("MESSAGE_LIMIT", &val, config.message_limit);
        }

        if let Some(val) = var("POST_LIMIT") {
            config.post_limit = parse_limit("POST_LIMIT", &val, config.post_limit);
        }

        if let Some(val) = var("SEED_DEMO_USER") {
            config.seed_demo_user = val != "false" && val != "0";
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    pub fn in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}

fn parse_limit(key: &str, value: &str, default: u32) -> u32 {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!(key, value, "Invalid limit, using default");
            default
        }
    }
}
