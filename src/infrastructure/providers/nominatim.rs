//! Nominatim (OpenStreetMap) provider strategy.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::entities::{GeocodeHit, GeocodeResult, MissType};
use crate::domain::provider::{GeocodeProvider, ProviderError};

const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Geocoding strategy backed by the public Nominatim API.
///
/// HTTP 429 is a rate-limit miss, an empty result set an unparseable-address
/// miss, and a result without a house number or postcode an imprecise-address
/// miss. Other non-success responses become unknown-error misses.
pub struct NominatimProvider {
    client: reqwest::Client,
}

impl NominatimProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    postcode: Option<String>,
}

fn classify(places: Vec<NominatimPlace>) -> Result<GeocodeResult, ProviderError> {
    let Some(place) = places.into_iter().next() else {
        return Ok(GeocodeResult::Miss(MissType::UnparseableAddress));
    };

    let (Some(house_number), Some(postcode)) = (place.address.house_number, place.address.postcode)
    else {
        return Ok(GeocodeResult::Miss(MissType::ImpreciseAddress));
    };

    let latitude = place
        .lat
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("unparseable latitude: {}", place.lat)))?;
    let longitude = place
        .lon
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("unparseable longitude: {}", place.lon)))?;

    Ok(GeocodeResult::Hit(GeocodeHit {
        latitude,
        longitude,
        display_address: place.display_name,
        street_number: house_number,
        postal_code: postcode,
        provider: "nominatim".to_string(),
    }))
}

#[async_trait]
impl GeocodeProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn resolve(&self, address: &str) -> Result<GeocodeResult, ProviderError> {
        let response = self
            .client
            .get(ENDPOINT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("q", address),
                ("addressdetails", "1"),
                ("format", "jsonv2"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Ok(GeocodeResult::Miss(MissType::RateLimitExceeded));
        }
        if !response.status().is_success() {
            return Ok(GeocodeResult::Miss(MissType::UnknownError));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        classify(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(house_number: Option<&str>, postcode: Option<&str>) -> NominatimPlace {
        NominatimPlace {
            lat: "45.5".to_string(),
            lon: "-73.6".to_string(),
            display_name: "123, Main Street, Montreal, Canada".to_string(),
            address: NominatimAddress {
                house_number: house_number.map(String::from),
                postcode: postcode.map(String::from),
            },
        }
    }

    #[test]
    fn test_full_address_is_a_hit() {
        let result = classify(vec![place(Some("123"), Some("H1A 1A1"))]).unwrap();
        let GeocodeResult::Hit(hit) = result else {
            panic!("expected a hit");
        };
        assert_eq!(hit.latitude, 45.5);
        assert_eq!(hit.longitude, -73.6);
        assert_eq!(hit.street_number, "123");
        assert_eq!(hit.postal_code, "H1A 1A1");
        assert_eq!(hit.provider, "nominatim");
    }

    #[test]
    fn test_no_results_is_unparseable() {
        assert_eq!(
            classify(vec![]).unwrap(),
            GeocodeResult::Miss(MissType::UnparseableAddress)
        );
    }

    #[test]
    fn test_partial_address_is_imprecise() {
        assert_eq!(
            classify(vec![place(None, Some("H1A 1A1"))]).unwrap(),
            GeocodeResult::Miss(MissType::ImpreciseAddress)
        );
        assert_eq!(
            classify(vec![place(Some("123"), None)]).unwrap(),
            GeocodeResult::Miss(MissType::ImpreciseAddress)
        );
    }

    #[test]
    fn test_bad_coordinates_are_malformed() {
        let mut bad = place(Some("123"), Some("H1A 1A1"));
        bad.lat = "not-a-number".to_string();
        assert!(matches!(
            classify(vec![bad]),
            Err(ProviderError::Malformed(_))
        ));
    }
}
