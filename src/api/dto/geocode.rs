//! DTOs for the geocode lookup endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CacheOutcome;
use crate::domain::entities::{GeocodeHit, GeocodeResult};

/// Query parameters for a lookup.
///
/// The address is required and must be non-empty; it is used verbatim as the
/// cache key, with no normalization.
#[derive(Debug, Deserialize, Validate)]
pub struct GeocodeParams {
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
}

/// The single response envelope for the query surface.
///
/// `status` is `"OK"` for a hit, a [`crate::domain::entities::MissType`]
/// code for a stored or fresh miss, or a request-validation code (errors use
/// the same shape, see `crate::error`). `result` carries the flattened hit
/// fields only when status is `"OK"`. `cache_type` reports whether this call
/// was served from the store (`"HIT"`) or the provider (`"MISS"`).
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub status: String,
    pub result: Option<GeocodeHit>,
    pub cache_type: Option<String>,
}

impl GeocodeResponse {
    /// Builds the wire payload from a lookup outcome.
    pub fn from_outcome(result: GeocodeResult, cache_outcome: CacheOutcome) -> Self {
        let cache_type = Some(cache_outcome.as_str().to_string());
        match result {
            GeocodeResult::Hit(hit) => Self {
                status: "OK".to_string(),
                result: Some(hit),
                cache_type,
            },
            GeocodeResult::Miss(miss) => Self {
                status: miss.as_code().to_string(),
                result: None,
                cache_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MissType;

    #[test]
    fn test_hit_payload() {
        let hit = GeocodeHit {
            latitude: 45.5,
            longitude: -73.6,
            display_address: "123 Main St".to_string(),
            street_number: "123".to_string(),
            postal_code: "H1A 1A1".to_string(),
            provider: "google".to_string(),
        };

        let response =
            GeocodeResponse::from_outcome(GeocodeResult::Hit(hit.clone()), CacheOutcome::Miss);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "OK");
        assert_eq!(value["cache_type"], "MISS");
        assert_eq!(value["result"]["latitude"], 45.5);
        assert_eq!(value["result"]["provider"], "google");
    }

    #[test]
    fn test_miss_payload_has_null_result() {
        let response = GeocodeResponse::from_outcome(
            GeocodeResult::Miss(MissType::ImpreciseAddress),
            CacheOutcome::Hit,
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "IMPRECISE_ADDRESS");
        assert_eq!(value["cache_type"], "HIT");
        assert!(value["result"].is_null());
    }
}
