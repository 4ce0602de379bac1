//! Repository trait for the resolution ledger.

use crate::domain::entities::GeocodeResult;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::Path;

/// Durable, keyed storage of at most one resolution outcome per raw address.
///
/// The raw address is the cache key, matched byte-exact with no
/// normalization. Query rows are append-only: an address is inserted once and
/// its outcome is immutable thereafter. There is no eviction and no TTL; the
/// store is a permanent ledger of outcomes, not a bounded cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteGeocodeRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodeRepository: Send + Sync {
    /// Looks up the stored outcome for a raw address.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(result))` when an outcome row exists (a stored `Miss` is a
    ///   cache hit carrying a negative outcome)
    /// - `Ok(None)` when no query row exists, or a query row exists with no
    ///   outcome row yet
    ///
    /// Side-effect free.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch(&self, raw_address: &str) -> Result<Option<GeocodeResult>, AppError>;

    /// Records the outcome of a first resolution.
    ///
    /// Idempotent with respect to the query row: the row is created on first
    /// sight of the address and its identity reused otherwise. Exactly one
    /// outcome row (hit or miss, chosen by [`GeocodeResult::is_miss`]) is then
    /// inserted for that identity, inside a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if an outcome row already exists for
    /// this address: a double resolution is a detectable error, never silent
    /// data drift. Callers that lose a first-resolution race recover by
    /// re-fetching the winning row.
    ///
    /// Returns [`AppError::Internal`] on other database errors, including an
    /// attempt to record a miss code missing from the lookup table.
    async fn store(&self, raw_address: &str, result: &GeocodeResult) -> Result<(), AppError>;

    /// Writes a consistent point-in-time copy of the store to `destination`.
    ///
    /// Safe to call while lookups continue to write; this is the primitive
    /// the snapshot exporter builds on.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the copy cannot be produced, e.g.
    /// when `destination` already exists.
    async fn snapshot_to(&self, destination: &Path) -> Result<(), AppError>;
}
