//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, provider selection, the snapshot
//! worker, and the Axum server lifecycle.

use crate::application::services::LookupService;
use crate::config::{Config, ProviderKind};
use crate::domain::provider::GeocodeProvider;
use crate::domain::repositories::GeocodeRepository;
use crate::infrastructure::persistence::SqliteGeocodeRepository;
use crate::infrastructure::providers::{GoogleProvider, NominatimProvider};
use crate::infrastructure::snapshot;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (foreign keys on)
/// - Migrations
/// - The configured provider strategy
/// - Snapshot exporter (when `SNAPSHOT_DIR` is set)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database cannot be opened, migrations fail, or
/// the server cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let repository: Arc<dyn GeocodeRepository> =
        Arc::new(SqliteGeocodeRepository::new(pool.clone()));
    let provider = build_provider(&config)?;
    tracing::info!(provider = provider.name(), "Provider configured");

    if let Some(directory) = &config.snapshot_dir {
        tokio::spawn(snapshot::run_snapshot_worker(
            repository.clone(),
            directory.clone(),
            Duration::from_secs(config.snapshot_interval_seconds),
        ));
        tracing::info!(directory = %directory.display(), "Snapshot worker started");
    }

    let state = AppState {
        lookup_service: Arc::new(LookupService::new(repository, provider)),
        pool,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes on Ctrl+C or SIGTERM, draining in-flight lookups before exit.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Writes one consistent snapshot of the store and exits.
///
/// Backs the `snapshot` CLI subcommand, for cron-driven exports.
///
/// # Errors
///
/// Returns an error if `SNAPSHOT_DIR` is unset or the copy fails.
pub async fn snapshot_once(config: Config) -> Result<()> {
    let directory = config
        .snapshot_dir
        .clone()
        .context("SNAPSHOT_DIR must be set to take a snapshot")?;

    let pool = connect_pool(&config).await?;
    let repository = SqliteGeocodeRepository::new(pool);

    snapshot::write_snapshot(&repository, &directory).await?;
    Ok(())
}

/// Opens the SQLite pool with foreign keys enforced.
///
/// Foreign keys are off by default in SQLite; the miss-type reference and
/// the outcome tables depend on them.
pub async fn connect_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .context("Failed to open database")?;
    tracing::info!("Connected to database");

    Ok(pool)
}

/// Builds the configured provider strategy behind a shared HTTP client.
fn build_provider(config: &Config) -> Result<Arc<dyn GeocodeProvider>> {
    let client = reqwest::Client::new();

    Ok(match config.provider {
        ProviderKind::Google => {
            let api_key = config
                .google_api_key
                .clone()
                .context("GOOGLE_API_KEY must be set when GEOCODING_PROVIDER is google")?;
            Arc::new(GoogleProvider::new(client, api_key))
        }
        ProviderKind::Nominatim => Arc::new(NominatimProvider::new(client)),
    })
}
