//! Geocode result entities: the tagged outcome of a resolution attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of reasons a geocoding attempt can fail.
///
/// The wire codes double as the persisted classification (the
/// `geocode_miss_types` lookup table) and as the `status` field of the HTTP
/// payload, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissType {
    RateLimitExceeded,
    ImpreciseAddress,
    UnparseableAddress,
    UnknownError,
}

impl MissType {
    /// Every defined classification, in storage-seed order.
    pub const ALL: [MissType; 4] = [
        MissType::RateLimitExceeded,
        MissType::ImpreciseAddress,
        MissType::UnparseableAddress,
        MissType::UnknownError,
    ];

    /// Returns the stable storage/wire code for this classification.
    pub fn as_code(&self) -> &'static str {
        match self {
            MissType::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            MissType::ImpreciseAddress => "IMPRECISE_ADDRESS",
            MissType::UnparseableAddress => "UNPARSEABLE_ADDRESS",
            MissType::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Parses a stored code back into its classification.
    ///
    /// Returns `None` for codes outside the closed set. Callers must treat
    /// that as an error, never as a default classification.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RATE_LIMIT_EXCEEDED" => Some(MissType::RateLimitExceeded),
            "IMPRECISE_ADDRESS" => Some(MissType::ImpreciseAddress),
            "UNPARSEABLE_ADDRESS" => Some(MissType::UnparseableAddress),
            "UNKNOWN_ERROR" => Some(MissType::UnknownError),
            _ => None,
        }
    }
}

impl fmt::Display for MissType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A successful resolution: coordinates plus the normalized address parts
/// reported by the provider that produced them.
///
/// Serializes to the flat key-value mapping used at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub latitude: f64,
    pub longitude: f64,
    pub display_address: String,
    pub street_number: String,
    pub postal_code: String,
    /// Name of the backend that produced this resolution, e.g. `"google"`.
    pub provider: String,
}

/// The outcome of a geocode attempt: a [`GeocodeHit`] or a classified miss.
///
/// A stored `Miss` is still a cache *hit* on a later lookup. The hit/miss
/// vocabulary here is about geocoding success, not about whether a lookup was
/// served from the store; see `CacheOutcome` for the latter.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    Hit(GeocodeHit),
    Miss(MissType),
}

impl GeocodeResult {
    /// Returns true when the provider could not geocode the address.
    pub fn is_miss(&self) -> bool {
        matches!(self, GeocodeResult::Miss(_))
    }
}
