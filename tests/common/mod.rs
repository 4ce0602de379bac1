#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geocoding_cache::application::services::LookupService;
use geocoding_cache::infrastructure::persistence::SqliteGeocodeRepository;
use geocoding_cache::prelude::*;

/// Fresh in-memory store with the schema applied.
///
/// A single connection keeps every handle on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// Fresh file-backed store with the schema applied.
///
/// Needed where in-memory SQLite falls short: `VACUUM INTO` silently no-ops
/// against a `:memory:` database, and a single connection cannot exercise
/// real writer contention. The returned guard keeps the database file alive.
pub async fn file_pool() -> (SqlitePool, tempfile::TempDir) {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("store.sqlite3");
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.to_str().unwrap()))
        .unwrap()
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    (pool, directory)
}

pub fn sample_hit() -> GeocodeResult {
    GeocodeResult::Hit(GeocodeHit {
        latitude: 45.5,
        longitude: -73.6,
        display_address: "123 Main St".to_string(),
        street_number: "123".to_string(),
        postal_code: "H1A 1A1".to_string(),
        provider: "google".to_string(),
    })
}

/// Provider double returning a fixed result and counting invocations.
pub struct StubProvider {
    result: GeocodeResult,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(result: GeocodeResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// A slow stub, so concurrent lookups all observe the unresolved state
    /// before any of them stores an outcome.
    pub fn with_delay(result: GeocodeResult, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            result,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodeProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn resolve(&self, _address: &str) -> Result<GeocodeResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.result.clone())
    }
}

/// Provider double whose calls always fail at the transport level.
pub struct FailingProvider;

#[async_trait]
impl GeocodeProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn resolve(&self, _address: &str) -> Result<GeocodeResult, ProviderError> {
        Err(ProviderError::Transport("connection refused".to_string()))
    }
}

pub fn create_test_state(pool: SqlitePool, provider: Arc<dyn GeocodeProvider>) -> AppState {
    let repository = Arc::new(SqliteGeocodeRepository::new(pool.clone()));
    AppState {
        lookup_service: Arc::new(LookupService::new(repository, provider)),
        pool,
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
