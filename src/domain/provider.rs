//! Provider capability: the single pluggable seam to external geocoding
//! backends.

use crate::domain::entities::GeocodeResult;
use async_trait::async_trait;
use thiserror::Error;

/// A provider call that failed without producing a classified outcome.
///
/// Distinct from a [`GeocodeResult::Miss`]: a miss is the backend's verdict
/// about the address and is persisted; a `ProviderError` is a failure of the
/// call itself (network, malformed payload) and must never be persisted. A
/// transient outage would otherwise permanently poison the cache for that
/// address.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned a malformed response: {0}")]
    Malformed(String),
}

/// An external geocoding backend, reduced to one capability: resolve an
/// address string to a [`GeocodeResult`].
///
/// Each implementation maps its backend's own error/status vocabulary into
/// the closed [`crate::domain::entities::MissType`] set: ambiguous or zero
/// results become `UnparseableAddress`, non-rooftop precision becomes
/// `ImpreciseAddress`, backend throttling becomes `RateLimitExceeded`, and
/// anything else non-success becomes `UnknownError`.
///
/// The lookup orchestrator treats this as a black box invoked only on a
/// cache miss; no rate limiting or retries happen at this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Stable backend name, recorded alongside each hit (e.g. `"google"`).
    fn name(&self) -> &'static str;

    /// Resolves a raw address to a hit or a classified miss.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the call itself fails rather than the
    /// backend classifying the address.
    async fn resolve(&self, address: &str) -> Result<GeocodeResult, ProviderError>;
}
