//! AWS station fan-out tests
//!
//! The pool is exercised against a throwaway upstream server so the tests
//! cover the real request path, the per-key failure isolation, and the
//! concurrency bound.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{AwsApiResponse, AwsStationReading};
use weather_dashboard_backend::external::AwsStationClient;
use weather_dashboard_backend::services::provinces::PROVINCES;
use weather_dashboard_backend::services::station_pool;

// ============================================================================
// Mock upstream
// ============================================================================

#[derive(Clone)]
struct MockFeed {
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    failing_province: Option<String>,
}

#[derive(Deserialize)]
struct ProvinceQuery {
    province: String,
}

async fn serve_province(
    State(feed): State<MockFeed>,
    Query(query): Query<ProvinceQuery>,
) -> Result<Json<AwsApiResponse>, StatusCode> {
    let current = feed.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    feed.max_in_flight.fetch_max(current, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(5)).await;
    feed.in_flight.fetch_sub(1, Ordering::SeqCst);

    if feed.failing_province.as_deref() == Some(query.province.as_str()) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let reading = AwsStationReading {
        station_name_thai: Some(query.province.clone()),
        temperature_c: Some(31.0),
        humidity_pct: Some(70.0),
        ..Default::default()
    };
    Ok(Json(AwsApiResponse {
        success: true,
        data: vec![reading],
        message: None,
    }))
}

async fn spawn_feed(failing_province: Option<String>) -> (std::net::SocketAddr, MockFeed) {
    let feed = MockFeed {
        in_flight: Arc::new(AtomicUsize::new(0)),
        max_in_flight: Arc::new(AtomicUsize::new(0)),
        failing_province,
    };
    let app = Router::new()
        .route("/", get(serve_province))
        .with_state(feed.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, feed)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn province_table_has_81_distinct_entries() {
    assert_eq!(PROVINCES.len(), 81);
    let distinct: HashSet<_> = PROVINCES.iter().collect();
    assert_eq!(distinct.len(), 81);
}

#[tokio::test]
async fn fan_out_covers_every_province_exactly_once() {
    let (addr, _feed) = spawn_feed(None).await;
    let client = AwsStationClient::new(format!("http://{}/", addr));

    let results = station_pool::fetch_all(&client, &PROVINCES, 8).await;

    assert_eq!(results.len(), 81);
    let keys: HashSet<_> = results.keys().map(String::as_str).collect();
    let expected: HashSet<_> = PROVINCES.iter().copied().collect();
    assert_eq!(keys, expected);

    for (province, outcome) in &results {
        assert!(outcome.success, "unexpected failure for {}", province);
        assert_eq!(outcome.data.len(), 1);
        assert_eq!(outcome.data[0].station_name_thai.as_deref(), Some(province.as_str()));
    }
}

#[tokio::test]
async fn one_failing_province_leaves_the_other_eighty_intact() {
    let failing = "เชียงใหม่";
    let (addr, _feed) = spawn_feed(Some(failing.to_string())).await;
    let client = AwsStationClient::new(format!("http://{}/", addr));

    let results = station_pool::fetch_all(&client, &PROVINCES, 8).await;
    assert_eq!(results.len(), 81);

    let placeholder = &results[failing];
    assert!(!placeholder.success);
    assert!(placeholder.data.is_empty());
    assert!(placeholder.message.is_some());

    let successes = results.values().filter(|r| r.success).count();
    assert_eq!(successes, 80);
}

#[tokio::test]
async fn concurrency_bound_is_respected() {
    let (addr, feed) = spawn_feed(None).await;
    let client = AwsStationClient::new(format!("http://{}/", addr));

    station_pool::fetch_all(&client, &PROVINCES, 8).await;

    let observed = feed.max_in_flight.load(Ordering::SeqCst);
    assert!(observed >= 1);
    assert!(observed <= 8, "saw {} requests in flight", observed);
}

#[tokio::test]
async fn zero_concurrency_still_completes_with_one_worker() {
    let (addr, feed) = spawn_feed(None).await;
    let client = AwsStationClient::new(format!("http://{}/", addr));

    let subset: Vec<&str> = PROVINCES.iter().copied().take(5).collect();
    let results = station_pool::fetch_all(&client, &subset, 0).await;

    assert_eq!(results.len(), 5);
    assert_eq!(feed.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn duplicate_input_provinces_collapse_to_one_key() {
    let (addr, _feed) = spawn_feed(None).await;
    let client = AwsStationClient::new(format!("http://{}/", addr));

    let duplicated = ["ภูเก็ต", "ภูเก็ต", "ระยอง"];
    let results = station_pool::fetch_all(&client, &duplicated, 2).await;
    assert_eq!(results.len(), 2);
}
