//! Runtime configuration, read from the environment with local defaults.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

pub const DATA_DIR_VAR: &str = "AGENCY_DASHBOARD_DATA_DIR";
pub const BIND_VAR: &str = "AGENCY_DASHBOARD_BIND";
pub const CORS_ORIGIN_VAR: &str = "AGENCY_DASHBOARD_CORS_ORIGIN";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_DATA_DIR_NAME: &str = "Agency Dashboard";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the CSV and YAML files. A redirect file inside it is
    /// followed when the connection is opened.
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_directory = value(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_directory);

        let bind = value(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_address = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: {}", BIND_VAR, bind))?;

        let cors_origin = value(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let config = AppConfig {
            data_directory,
            bind_address,
            cors_origin,
        };
        info!("Using data directory {}", config.data_directory.display());
        Ok(config)
    }
}

/// `~/Documents/Agency Dashboard`, falling back to the home directory and then
/// the working directory when those cannot be determined
fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATA_DIR_NAME)
}
