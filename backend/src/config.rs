//! Server configuration, read from `EXPENSE_TRACKER_*` environment variables.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ADDR_VAR: &str = "EXPENSE_TRACKER_ADDR";
pub const DATA_DIR_VAR: &str = "EXPENSE_TRACKER_DATA_DIR";
pub const CORS_ORIGIN_VAR: &str = "EXPENSE_TRACKER_CORS_ORIGIN";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3001";
const DEFAULT_DATA_DIR_NAME: &str = "Expense Tracker";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub data_directory: PathBuf,
    /// Origin allowed to call the API from a browser
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source; unset or blank values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_address = addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a valid socket address: {}", ADDR_VAR, addr))?;

        let data_directory = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_directory(get("HOME")),
        };

        let origin = get(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(origin.trim())
            .with_context(|| format!("{} is not a valid origin: {}", CORS_ORIGIN_VAR, origin))?;

        Ok(Self {
            bind_address,
            data_directory,
            cors_origin,
        })
    }
}

/// `$HOME/Documents/Expense Tracker`, or a temp-dir location when there is no home
fn default_data_directory(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join("Documents").join(DEFAULT_DATA_DIR_NAME),
        None => std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME),
    }
}
