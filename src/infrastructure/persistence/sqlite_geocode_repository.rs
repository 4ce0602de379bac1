//! SQLite implementation of the resolution ledger.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::domain::entities::{GeocodeHit, GeocodeResult, MissType};
use crate::domain::repositories::GeocodeRepository;
use crate::error::AppError;

const SELECT_RESULT: &str = r#"
SELECT
    h.id AS hit_id,
    h.latitude,
    h.longitude,
    h.formatted_address,
    h.street_number,
    h.postal_code,
    h.provider,
    mt.code AS miss_code
FROM geocode_queries q
LEFT JOIN geocode_hits h ON h.geocode_query_id = q.id
LEFT JOIN geocode_misses m ON m.geocode_query_id = q.id
LEFT JOIN geocode_miss_types mt ON mt.id = m.miss_type_id
WHERE q.raw_address = ?
"#;

const INSERT_QUERY: &str = r#"
INSERT INTO geocode_queries (raw_address)
VALUES (?)
ON CONFLICT (raw_address) DO NOTHING
"#;

const SELECT_QUERY_ID: &str = "SELECT id FROM geocode_queries WHERE raw_address = ?";

const SELECT_RESOLVED: &str = r#"
SELECT EXISTS (SELECT 1 FROM geocode_hits WHERE geocode_query_id = ?)
    OR EXISTS (SELECT 1 FROM geocode_misses WHERE geocode_query_id = ?)
"#;

const INSERT_HIT: &str = r#"
INSERT INTO geocode_hits (
    geocode_query_id,
    latitude,
    longitude,
    formatted_address,
    street_number,
    postal_code,
    provider
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

// The subselect yields NULL for a code outside the lookup table, which trips
// the NOT NULL constraint: an undefined code fails the write instead of
// storing an orphan reference.
const INSERT_MISS: &str = r#"
INSERT INTO geocode_misses (geocode_query_id, miss_type_id)
VALUES (?, (SELECT id FROM geocode_miss_types WHERE code = ?))
"#;

/// SQLite-backed [`GeocodeRepository`] over an SQLx connection pool.
///
/// Foreign keys must be enabled on the pool's connections (see
/// `server::connect_pool`); the miss-type reference relies on it.
pub struct SqliteGeocodeRepository {
    pool: SqlitePool,
}

impl SqliteGeocodeRepository {
    /// Creates a new repository over a connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeocodeRepository for SqliteGeocodeRepository {
    async fn fetch(&self, raw_address: &str) -> Result<Option<GeocodeResult>, AppError> {
        let row = sqlx::query(SELECT_RESULT)
            .bind(raw_address)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let hit_id: Option<i64> = row.try_get("hit_id")?;
        if hit_id.is_some() {
            return Ok(Some(GeocodeResult::Hit(GeocodeHit {
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
                display_address: row.try_get("formatted_address")?,
                street_number: row.try_get("street_number")?,
                postal_code: row.try_get("postal_code")?,
                provider: row.try_get("provider")?,
            })));
        }

        let miss_code: Option<String> = row.try_get("miss_code")?;
        match miss_code {
            Some(code) => {
                let miss = MissType::from_code(&code).ok_or_else(|| {
                    AppError::internal(format!("stored miss code is not in the closed set: {code}"))
                })?;
                Ok(Some(GeocodeResult::Miss(miss)))
            }
            // A query row with no outcome row yet: still unresolved.
            None => Ok(None),
        }
    }

    async fn store(&self, raw_address: &str, result: &GeocodeResult) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Insert-or-ignore first: the write lock taken here serializes
        // concurrent store calls for the whole transaction.
        sqlx::query(INSERT_QUERY)
            .bind(raw_address)
            .execute(&mut *tx)
            .await?;

        let query_id: i64 = sqlx::query_scalar(SELECT_QUERY_ID)
            .bind(raw_address)
            .fetch_one(&mut *tx)
            .await?;

        let resolved: bool = sqlx::query_scalar(SELECT_RESOLVED)
            .bind(query_id)
            .bind(query_id)
            .fetch_one(&mut *tx)
            .await?;
        if resolved {
            return Err(AppError::conflict(
                "an outcome is already recorded for this address",
            ));
        }

        match result {
            GeocodeResult::Hit(hit) => {
                sqlx::query(INSERT_HIT)
                    .bind(query_id)
                    .bind(hit.latitude)
                    .bind(hit.longitude)
                    .bind(&hit.display_address)
                    .bind(&hit.street_number)
                    .bind(&hit.postal_code)
                    .bind(&hit.provider)
                    .execute(&mut *tx)
                    .await?;
            }
            GeocodeResult::Miss(miss) => {
                sqlx::query(INSERT_MISS)
                    .bind(query_id)
                    .bind(miss.as_code())
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn snapshot_to(&self, destination: &Path) -> Result<(), AppError> {
        let path = destination
            .to_str()
            .ok_or_else(|| AppError::internal("snapshot destination is not valid UTF-8"))?;

        // VACUUM INTO writes a consistent copy without blocking live writers.
        sqlx::query("VACUUM INTO ?")
            .bind(path)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
