//! Configuration module for the Connect backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for admin API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory for uploaded ambassador photos, served under /uploads
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// When false, /api/track acknowledges beacons without persisting them
    pub tracking_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("CONNECT_API_PSK").ok();

        let db_path = env::var("CONNECT_DB_PATH")
            .unwrap_or_else(|_| "./data/connect.sqlite".to_string())
            .into();

        let upload_dir = env::var("CONNECT_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("CONNECT_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CONNECT_BIND_ADDR format");

        let log_level = env::var("CONNECT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let tracking_enabled = env::var("CONNECT_TRACKING_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            api_psk,
            db_path,
            upload_dir,
            bind_addr,
            log_level,
            tracking_enabled,
        }
    }
}
