//! HTTP-level tests for the Log Pose REST surface.
//!
//! Drive the real router in-process with `tower::ServiceExt::oneshot`; the
//! store is the in-memory one, so no external services are needed.

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use logpose_core::{ports::WaypointStore, store::InMemoryWaypointStore, WaypointDraft};
use logpose_server::auth::AdminSecret;
use logpose_server::router::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_SECRET: &str = "test-admin-secret";

// ── Test app builder ───────────────────────────────────────────

fn route(n: usize) -> Vec<WaypointDraft> {
    (0..n)
        .map(|i| WaypointDraft::new(format!("Stop {}", i + 1), 50.93 + i as f64 * 0.001, 6.95))
        .collect()
}

fn build_test_app(n: usize) -> (axum::Router, Arc<dyn WaypointStore>) {
    let store: Arc<dyn WaypointStore> =
        Arc::new(InMemoryWaypointStore::new(route(n)).expect("valid test route"));
    let app = build_router(Arc::clone(&store), AdminSecret::new(TEST_SECRET));
    (app, store)
}

// ── Helpers ────────────────────────────────────────────────────

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }))
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: &axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

async fn post_plain(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

// ── Public reads ───────────────────────────────────────────────

#[tokio::test]
async fn test_health_no_auth() {
    let (app, _) = build_test_app(1);
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_get_current_starts_at_first_waypoint() {
    let (app, _) = build_test_app(3);
    let (status, body) = get(&app, "/api/current").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["index"], 0);
    assert_eq!(body["total"], 3);
    assert_eq!(body["location"]["id"], 1);
    assert_eq!(body["location"]["name"], "Stop 1");
}

#[tokio::test]
async fn test_list_locations() {
    let (app, _) = build_test_app(3);
    let (status, body) = get(&app, "/api/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentIndex"], 0);
    assert_eq!(body["locations"].as_array().unwrap().len(), 3);
}

// ── Set active index ───────────────────────────────────────────

#[tokio::test]
async fn test_set_current_with_secret() {
    let (app, store) = build_test_app(3);
    let (status, body) = post(
        &app,
        "/api/current",
        json!({ "password": TEST_SECRET, "locationIndex": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["index"], 2);
    assert_eq!(body["location"]["name"], "Stop 3");

    assert_eq!(store.current().await.unwrap().index, 2);
    let (_, current) = get(&app, "/api/current").await;
    assert_eq!(current["index"], 2);
}

#[tokio::test]
async fn test_set_current_wrong_secret_is_401_and_no_mutation() {
    let (app, store) = build_test_app(3);
    let (status, body) = post(
        &app,
        "/api/current",
        json!({ "password": "guess", "locationIndex": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "wrong admin secret");
    assert_eq!(store.current().await.unwrap().index, 0);
}

#[tokio::test]
async fn test_set_current_out_of_range_is_400_and_no_mutation() {
    let (app, store) = build_test_app(3);
    store.set_active(1).await.unwrap();

    for bad in [json!(3), json!(-1), json!(1.5), json!("1")] {
        let (status, body) = post(
            &app,
            "/api/current",
            json!({ "password": TEST_SECRET, "locationIndex": bad }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "index {bad} accepted");
        assert_eq!(body["success"], false);
    }
    assert_eq!(store.current().await.unwrap().index, 1);
}

#[tokio::test]
async fn test_wrong_secret_checked_before_validation() {
    let (app, _) = build_test_app(3);
    let (status, _) = post(&app, "/api/current", json!({ "locationIndex": 99 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_string_password_is_401_and_no_mutation() {
    let (app, store) = build_test_app(3);
    for password in [json!(null), json!(1234), json!(["x"])] {
        let (status, body) = post(
            &app,
            "/api/current",
            json!({ "password": password, "locationIndex": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "password {password}");
        assert_eq!(body["error"], "wrong admin secret");
    }
    assert_eq!(store.current().await.unwrap().index, 0);
}

#[tokio::test]
async fn test_missing_content_type_still_checks_secret() {
    let (app, store) = build_test_app(3);
    let (status, _) = post_plain(
        &app,
        "/api/current",
        json!({ "password": "guess", "locationIndex": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.current().await.unwrap().index, 0);

    let (status, body) = post_plain(
        &app,
        "/api/current",
        json!({ "password": TEST_SECRET, "locationIndex": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"], 1);
}

#[tokio::test]
async fn test_empty_body_is_401() {
    let (app, _) = build_test_app(3);
    let (status, _) = post_raw(&app, "/api/locations", String::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_integral_float_index_is_accepted() {
    let (app, store) = build_test_app(3);
    let (status, body) = post(
        &app,
        "/api/current",
        json!({ "password": TEST_SECRET, "locationIndex": 2.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"], 2);
    assert_eq!(store.current().await.unwrap().index, 2);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, _) = build_test_app(3);
    let (status, body) = post_raw(&app, "/api/current", "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ── Replace list ───────────────────────────────────────────────

#[tokio::test]
async fn test_replace_locations_reindexes() {
    let (app, store) = build_test_app(3);
    store.set_active(1).await.unwrap();

    let (status, body) = post(
        &app,
        "/api/locations",
        json!({
            "password": TEST_SECRET,
            "locations": [
                { "name": "Dom", "lat": 50.9413, "lng": 6.9583 },
                { "lat": "50.9358", "lng": "6.9611" },
                { "name": "Rhein", "lat": 50.94, "lng": 6.97 },
                { "name": "Ende", "lat": 50.95, "lng": 6.98 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentIndex"], 1);
    let locations = body["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 4);
    assert_eq!(locations[0]["id"], 1);
    assert_eq!(locations[3]["id"], 4);
    assert_eq!(locations[1]["name"], "Location 2");
    assert_eq!(locations[1]["lat"], 50.9358);
}

#[tokio::test]
async fn test_replace_shorter_list_resets_index() {
    let (app, store) = build_test_app(5);
    store.set_active(4).await.unwrap();

    let (status, body) = post(
        &app,
        "/api/locations",
        json!({
            "password": TEST_SECRET,
            "locations": [{ "name": "Only", "lat": 1.0, "lng": 2.0 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentIndex"], 0);

    let (_, current) = get(&app, "/api/current").await;
    assert_eq!(current["location"]["name"], "Only");
    assert_eq!(current["total"], 1);
}

#[tokio::test]
async fn test_replace_rejects_bad_payloads_without_mutation() {
    let (app, store) = build_test_app(3);

    let cases = [
        json!({ "password": TEST_SECRET, "locations": [] }),
        json!({ "password": TEST_SECRET, "locations": "nope" }),
        json!({ "password": TEST_SECRET }),
        json!({ "password": TEST_SECRET, "locations": [{ "name": "x", "lat": 100.0, "lng": 0.0 }] }),
        json!({ "password": TEST_SECRET, "locations": [{ "name": "x", "lat": "abc", "lng": 0.0 }] }),
    ];
    for case in cases {
        let (status, body) = post(&app, "/api/locations", case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {case}");
        assert_eq!(body["success"], false);
    }

    assert_eq!(store.all().await.unwrap().locations.len(), 3);
}

#[tokio::test]
async fn test_replace_wrong_secret_is_401() {
    let (app, store) = build_test_app(3);
    let (status, _) = post(
        &app,
        "/api/locations",
        json!({ "password": "nope", "locations": [{ "lat": 1.0, "lng": 1.0 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.all().await.unwrap().locations.len(), 3);
}

// ── Verify ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_verify_secret_does_not_move_pointer() {
    let (app, store) = build_test_app(3);
    store.set_active(2).await.unwrap();

    let (status, body) = post(&app, "/api/auth/verify", json!({ "password": TEST_SECRET })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(store.current().await.unwrap().index, 2);

    let (status, _) = post(&app, "/api/auth/verify", json!({ "password": "x" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/api/auth/verify", json!({ "password": null })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
