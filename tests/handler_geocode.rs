mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use common::{
    FailingProvider, StubProvider, count_rows, create_test_state, file_pool, sample_hit, test_pool,
};
use geocoding_cache::api::handlers::geocode_handler;
use geocoding_cache::prelude::*;

fn test_app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(geocode_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_missing_address_is_bad_request() {
    let pool = test_pool().await;
    let provider = StubProvider::new(sample_hit());
    let server = test_app(create_test_state(pool.clone(), provider.clone()));

    let response = server.get("/").await;
    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "BAD_REQUEST");
    assert!(body["result"].is_null());
    assert!(body["cache_type"].is_null());

    // No provider invocation, no store access.
    assert_eq!(provider.call_count(), 0);
    assert_eq!(count_rows(&pool, "geocode_queries").await, 0);
}

#[tokio::test]
async fn test_empty_address_is_bad_request() {
    let pool = test_pool().await;
    let provider = StubProvider::new(sample_hit());
    let server = test_app(create_test_state(pool.clone(), provider.clone()));

    let response = server.get("/").add_query_param("address", "").await;
    response.assert_status_bad_request();
    assert_eq!(provider.call_count(), 0);
    assert_eq!(count_rows(&pool, "geocode_queries").await, 0);
}

#[tokio::test]
async fn test_hit_then_cached_hit() {
    let pool = test_pool().await;
    let provider = StubProvider::new(GeocodeResult::Hit(GeocodeHit {
        latitude: 45.5,
        longitude: -73.6,
        display_address: "123 Main St".to_string(),
        street_number: "123".to_string(),
        postal_code: "H1A 1A1".to_string(),
        provider: "google".to_string(),
    }));
    let server = test_app(create_test_state(pool.clone(), provider.clone()));

    let address = "123 fake address";

    let response = server.get("/").add_query_param("address", address).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(
        body,
        json!({
            "status": "OK",
            "result": {
                "latitude": 45.5,
                "longitude": -73.6,
                "display_address": "123 Main St",
                "street_number": "123",
                "postal_code": "H1A 1A1",
                "provider": "google"
            },
            "cache_type": "MISS"
        })
    );

    let cached = server.get("/").add_query_param("address", address).await;
    cached.assert_status_ok();

    let mut expected = body;
    expected["cache_type"] = json!("HIT");
    assert_eq!(cached.json::<Value>(), expected);

    // The provider was billed exactly once across both calls.
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_miss_then_cached_miss() {
    let pool = test_pool().await;
    let provider = StubProvider::new(GeocodeResult::Miss(MissType::ImpreciseAddress));
    let server = test_app(create_test_state(pool.clone(), provider.clone()));

    let address = "Quebec City, Québec, Canada";

    let response = server.get("/").add_query_param("address", address).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "IMPRECISE_ADDRESS",
            "result": null,
            "cache_type": "MISS"
        })
    );

    let cached = server.get("/").add_query_param("address", address).await;
    cached.assert_status_ok();
    assert_eq!(
        cached.json::<Value>(),
        json!({
            "status": "IMPRECISE_ADDRESS",
            "result": null,
            "cache_type": "HIT"
        })
    );

    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_provider_failure_does_not_poison_the_cache() {
    let pool = test_pool().await;
    let address = "123 fake address";

    let failing = test_app(create_test_state(pool.clone(), Arc::new(FailingProvider)));
    let response = failing.get("/").add_query_param("address", address).await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["status"], "PROVIDER_ERROR");

    // The transport failure was not persisted as a miss.
    assert_eq!(count_rows(&pool, "geocode_misses").await, 0);

    // Once the provider recovers, the same address resolves normally.
    let provider = StubProvider::new(sample_hit());
    let healthy = test_app(create_test_state(pool.clone(), provider.clone()));
    let response = healthy.get("/").add_query_param("address", address).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["cache_type"], "MISS");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_address_is_matched_byte_exact() {
    let pool = test_pool().await;
    let provider = StubProvider::new(sample_hit());
    let server = test_app(create_test_state(pool.clone(), provider.clone()));

    server
        .get("/")
        .add_query_param("address", "123 Main St")
        .await
        .assert_status_ok();
    server
        .get("/")
        .add_query_param("address", "123 main st")
        .await
        .assert_status_ok();

    // No normalization: different casing is a different cache key.
    assert_eq!(provider.call_count(), 2);
    assert_eq!(count_rows(&pool, "geocode_queries").await, 2);
}

#[tokio::test]
async fn test_concurrent_first_lookups_store_one_outcome() {
    // File-backed with several connections, so racing writers contend on
    // the real database lock rather than on a single pooled connection.
    let (pool, _store_dir) = file_pool().await;
    let provider = StubProvider::with_delay(sample_hit(), Duration::from_millis(50));
    let state = create_test_state(pool.clone(), provider.clone());
    let service = state.lookup_service.clone();

    let address = "123 fake address";
    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(
            async move { service.lookup(address).await },
        ));
    }

    let mut results = Vec::new();
    for handle in handles {
        let (result, _) = handle.await.unwrap().unwrap();
        results.push(result);
    }

    // Every caller observes the single stored outcome.
    for result in &results {
        assert_eq!(*result, sample_hit());
    }

    assert_eq!(count_rows(&pool, "geocode_queries").await, 1);
    assert_eq!(count_rows(&pool, "geocode_hits").await, 1);
    assert_eq!(count_rows(&pool, "geocode_misses").await, 0);

    // Racing callers may each have paid for a provider call, but at least
    // one did and none was duplicated afterwards.
    assert!(provider.call_count() >= 1);
    assert!(provider.call_count() <= 8);

    let (_, outcome) = service.lookup(address).await.unwrap();
    assert_eq!(outcome, CacheOutcome::Hit);
}
