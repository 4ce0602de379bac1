//! Cache-aside lookup orchestration.

use std::sync::Arc;

use crate::domain::entities::GeocodeResult;
use crate::domain::provider::GeocodeProvider;
use crate::domain::repositories::GeocodeRepository;
use crate::error::AppError;

/// Whether a lookup was served from the store or required a provider call.
///
/// Deliberately reuses the hit/miss vocabulary of [`GeocodeResult`] for a
/// different axis: a stored negative outcome is a cache `Hit` whose result is
/// a geocoding miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    /// Wire representation of the outcome (`"HIT"` / `"MISS"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOutcome::Hit => "HIT",
            CacheOutcome::Miss => "MISS",
        }
    }
}

/// Ties the store and the provider capability together.
///
/// The only stateful control flow in the core: two states per address
/// (unresolved / resolved) and one irreversible transition, triggered by a
/// successful store. Dependencies are constructor-injected; there is no
/// ambient connection or provider state.
pub struct LookupService {
    repository: Arc<dyn GeocodeRepository>,
    provider: Arc<dyn GeocodeProvider>,
}

impl LookupService {
    /// Creates a new lookup service over a store and a provider capability.
    pub fn new(repository: Arc<dyn GeocodeRepository>, provider: Arc<dyn GeocodeProvider>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Resolves a raw address through the cache-aside protocol.
    ///
    /// 1. Fetch from the store; if present, return it with
    ///    [`CacheOutcome::Hit`] - no provider call, no write.
    /// 2. Otherwise resolve through the provider and store the outcome.
    /// 3. Return the outcome with [`CacheOutcome::Miss`].
    ///
    /// Concurrent first lookups for the same address may each reach the
    /// provider, but the store admits only one outcome row; a caller whose
    /// write loses that race re-reads the winning row and returns it. The
    /// loser still reports a cache miss, since its provider call happened.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty address, before any
    /// store or provider access. Returns [`AppError::Provider`] when the
    /// provider call fails; the failure is not persisted, so a later lookup
    /// retries the provider. Returns [`AppError::Internal`] on storage
    /// failures.
    pub async fn lookup(
        &self,
        raw_address: &str,
    ) -> Result<(GeocodeResult, CacheOutcome), AppError> {
        if raw_address.is_empty() {
            return Err(AppError::bad_request("address must not be empty"));
        }

        if let Some(stored) = self.repository.fetch(raw_address).await? {
            tracing::debug!(address = raw_address, "served from cache");
            return Ok((stored, CacheOutcome::Hit));
        }

        let result = match self.provider.resolve(raw_address).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    address = raw_address,
                    error = %e,
                    "provider call failed; leaving address unresolved"
                );
                return Err(AppError::provider(e.to_string()));
            }
        };

        match self.repository.store(raw_address, &result).await {
            Ok(()) => Ok((result, CacheOutcome::Miss)),
            Err(AppError::Conflict { .. }) => {
                // Lost a first-resolution race; the winning row is
                // authoritative for this address from now on.
                tracing::debug!(address = raw_address, "lost resolution race, re-reading");
                let winner = self.repository.fetch(raw_address).await?.ok_or_else(|| {
                    AppError::internal("conflicting write reported but no stored outcome found")
                })?;
                Ok((winner, CacheOutcome::Miss))
            }
            Err(e) => Err(e),
        }
    }
}
