//! Handler for the geocode lookup endpoint.

use axum::{Json, extract::Query, extract::State};
use validator::Validate;

use crate::api::dto::geocode::{GeocodeParams, GeocodeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Looks up coordinates for a raw address string.
///
/// # Endpoint
///
/// `GET /?address=<raw address>`
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "result": {
///     "latitude": 45.5,
///     "longitude": -73.6,
///     "display_address": "123 Main St, Montreal, QC H1A 1A1, Canada",
///     "street_number": "123",
///     "postal_code": "H1A 1A1",
///     "provider": "google"
///   },
///   "cache_type": "MISS"
/// }
/// ```
///
/// For a geocoding miss, `status` carries the miss code (e.g.
/// `"IMPRECISE_ADDRESS"`) and `result` is null. `cache_type` is `"HIT"` when
/// the outcome came from the store and `"MISS"` when the provider was called.
///
/// # Errors
///
/// Returns 400 with status `BAD_REQUEST` when the address parameter is
/// missing or empty; no store or provider access happens in that case.
/// Returns 502 with status `PROVIDER_ERROR` when the provider call fails.
pub async fn geocode_handler(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>, AppError> {
    params.validate()?;
    let Some(address) = params.address else {
        return Err(AppError::bad_request(
            "missing required query parameter: address",
        ));
    };

    let (result, cache_outcome) = state.lookup_service.lookup(&address).await?;

    Ok(Json(GeocodeResponse::from_outcome(result, cache_outcome)))
}
