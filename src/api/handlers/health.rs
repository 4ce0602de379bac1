//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with a store connectivity check.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: store reachable
/// - **503 Service Unavailable**: store unreachable or missing its seed data
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity by counting the seeded miss-type codes.
async fn check_database(state: &AppState) -> CheckStatus {
    let count: Result<i64, sqlx::Error> =
        sqlx::query_scalar("SELECT COUNT(*) FROM geocode_miss_types")
            .fetch_one(&state.pool)
            .await;

    match count {
        Ok(count) if count > 0 => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {count} miss types seeded")),
        },
        Ok(_) => CheckStatus {
            status: "error".to_string(),
            message: Some("Miss type table is empty".to_string()),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {e}")),
        },
    }
}
