//! Application configuration loaded from environment variables.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - SQLite database, e.g. `sqlite://geocoding_cache.sqlite3`
//! - `GOOGLE_API_KEY` - required when the Google provider is selected
//!
//! ## Optional Variables
//!
//! - `GEOCODING_PROVIDER` - `google` or `nominatim` (default: `google`)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `SNAPSHOT_DIR` - enables the periodic snapshot exporter when set
//! - `SNAPSHOT_INTERVAL_SECONDS` - exporter cadence (default: 86400)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)

use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

/// Which concrete provider strategy serves cache misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Nominatim,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub provider: ProviderKind,
    /// Present whenever the Google provider is selected.
    pub google_api_key: Option<String>,
    /// Snapshot exporter target directory; the exporter is disabled when unset.
    pub snapshot_dir: Option<PathBuf>,
    pub snapshot_interval_seconds: u64,
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, the provider name is
    /// unknown, or the selected provider lacks its API key.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let provider_name =
            env::var("GEOCODING_PROVIDER").unwrap_or_else(|_| "google".to_string());
        let provider = match provider_name.as_str() {
            "google" => ProviderKind::Google,
            "nominatim" => ProviderKind::Nominatim,
            other => bail!("unsupported GEOCODING_PROVIDER: {other}"),
        };

        let google_api_key = env::var("GOOGLE_API_KEY").ok();
        if provider == ProviderKind::Google && google_api_key.is_none() {
            bail!("GOOGLE_API_KEY must be set when GEOCODING_PROVIDER is google");
        }

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let snapshot_dir = env::var("SNAPSHOT_DIR").ok().map(PathBuf::from);

        let snapshot_interval_seconds = env::var("SNAPSHOT_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            provider,
            google_api_key,
            snapshot_dir,
            snapshot_interval_seconds,
            db_max_connections,
        })
    }
}
