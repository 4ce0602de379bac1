//! Google Geocoding API provider strategy.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::entities::{GeocodeHit, GeocodeResult, MissType};
use crate::domain::provider::{GeocodeProvider, ProviderError};

const ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoding strategy backed by the Google Geocoding API.
///
/// Status mapping: `OVER_QUERY_LIMIT` is a rate-limit miss, `ZERO_RESULTS`
/// an unparseable-address miss, any other non-`OK` status an unknown-error
/// miss. A result is only a hit when Google reports rooftop precision and
/// both a street number and a postal code; anything fuzzier is an
/// imprecise-address miss.
pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: Geometry,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
    location_type: String,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    types: Vec<String>,
}

fn classify(response: GoogleResponse) -> Result<GeocodeResult, ProviderError> {
    match response.status.as_str() {
        "OVER_QUERY_LIMIT" => return Ok(GeocodeResult::Miss(MissType::RateLimitExceeded)),
        "ZERO_RESULTS" => return Ok(GeocodeResult::Miss(MissType::UnparseableAddress)),
        "OK" => {}
        _ => return Ok(GeocodeResult::Miss(MissType::UnknownError)),
    }

    let Some(result) = response.results.into_iter().next() else {
        return Err(ProviderError::Malformed(
            "status OK with an empty result list".to_string(),
        ));
    };

    if result.geometry.location_type != "ROOFTOP" {
        return Ok(GeocodeResult::Miss(MissType::ImpreciseAddress));
    }

    let mut street_number = None;
    let mut postal_code = None;
    for part in result.address_components {
        if part.types.iter().any(|t| t == "street_number") {
            street_number = Some(part.long_name);
        } else if part.types.iter().any(|t| t == "postal_code") {
            postal_code = Some(part.long_name);
        }
    }

    let (Some(street_number), Some(postal_code)) = (street_number, postal_code) else {
        return Ok(GeocodeResult::Miss(MissType::ImpreciseAddress));
    };

    Ok(GeocodeResult::Hit(GeocodeHit {
        latitude: result.geometry.location.lat,
        longitude: result.geometry.location.lng,
        display_address: result.formatted_address,
        street_number,
        postal_code,
        provider: "google".to_string(),
    }))
}

#[async_trait]
impl GeocodeProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn resolve(&self, address: &str) -> Result<GeocodeResult, ProviderError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .json::<GoogleResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        classify(response)
    }
}
