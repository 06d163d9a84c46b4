//! End-to-end smoke tests for the full roostd stack.
//!
//! Each test wires the complete application (virtual door, real controller,
//! real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use roost_adapter_http_axum::router;
use roost_adapter_http_axum::state::AppState;
use roost_adapter_virtual::VirtualDoor;
use roost_app::controller::{CoopController, CoopSettings};
use roost_domain::condition::{ConditionMode, ConditionSpec, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

/// Build a fully-wired router around a zero-travel virtual door.
fn app(automatic: bool) -> axum::Router {
    let controller = CoopController::new(
        VirtualDoor::default(),
        CoopSettings {
            latitude: 0.0,
            longitude: 0.0,
            automatic,
            opening: ConditionSpec {
                mode: ConditionMode::TimeBased,
                value: "07:00".to_string(),
            },
            closing: ConditionSpec {
                mode: ConditionMode::SunBased,
                value: "+00:10".to_string(),
            },
        },
    )
    .expect("settings should resolve");
    router::build(AppState::new(controller))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const MANUAL_CLOSED: &str = r#"{
    "status": "closed",
    "automatic": false,
    "opening_condition": {"mode": "time_based", "value": "07:00"},
    "closing_condition": {"mode": "time_based", "value": "20:00"}
}"#;

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_answer_health_check() {
    let response = app(false).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

// ---------------------------------------------------------------------------
// Coop overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_unknown_status_and_default_location_at_startup() {
    let response = app(true).oneshot(get("/api/coop")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unknown");
    assert_eq!(body["automatic"], true);
    assert!((body["latitude"].as_f64().unwrap() - DEFAULT_LATITUDE).abs() < f64::EPSILON);
    assert!((body["longitude"].as_f64().unwrap() - DEFAULT_LONGITUDE).abs() < f64::EPSILON);
    // Thresholds are RFC 3339 instants of today.
    assert!(body["opening_time"].as_str().unwrap().contains('T'));
    assert!(body["closing_time"].as_str().unwrap().contains('T'));
}

// ---------------------------------------------------------------------------
// Manual control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_walk_through_a_manual_open_close_cycle() {
    let app = app(false);

    let response = app
        .clone()
        .oneshot(post("/api/coop", MANUAL_CLOSED))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(post("/api/coop/open", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(app.clone().oneshot(get("/api/coop")).await.unwrap()).await;
    assert_eq!(body["status"], "opened");

    let response = app.clone().oneshot(post("/api/coop/close", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(app.oneshot(get("/api/coop")).await.unwrap()).await;
    assert_eq!(body["status"], "closed");
}

#[tokio::test]
async fn should_conflict_when_opening_twice() {
    let app = app(false);
    app.clone()
        .oneshot(post("/api/coop", MANUAL_CLOSED))
        .await
        .unwrap();
    app.clone().oneshot(post("/api/coop/open", "")).await.unwrap();

    let response = app.oneshot(post("/api/coop/open", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "the coop is already opened");
}

#[tokio::test]
async fn should_conflict_when_status_is_unknown() {
    let response = app(false).oneshot(post("/api/coop/open", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "the coop status is unknown, reconcile it manually first"
    );
}

#[tokio::test]
async fn should_forbid_manual_control_while_automatic() {
    let app = app(true);
    let response = app.clone().oneshot(post("/api/coop/open", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.oneshot(post("/api/coop/close", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_invalid_status_literal_on_update() {
    let body = r#"{
        "status": "invalid",
        "automatic": true,
        "opening_condition": {"mode": "time_based", "value": "07:00"},
        "closing_condition": {"mode": "time_based", "value": "20:00"}
    }"#;
    let response = app(false).oneshot(post("/api/coop", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid status literal: \"invalid\"");
}

#[tokio::test]
async fn should_reject_malformed_condition_on_update() {
    let body = r#"{
        "status": "closed",
        "automatic": true,
        "opening_condition": {"mode": "sun_based", "value": "dawn"},
        "closing_condition": {"mode": "time_based", "value": "20:00"}
    }"#;
    let response = app(false).oneshot(post("/api/coop", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid offset format: \"dawn\"");
}

#[tokio::test]
async fn should_flip_to_automatic_via_update() {
    let app = app(false);
    let body = r#"{
        "status": "opened",
        "automatic": true,
        "opening_condition": {"mode": "sun_based", "value": "-00:30"},
        "closing_condition": {"mode": "sun_based", "value": "+00:30"}
    }"#;
    let response = app.clone().oneshot(post("/api/coop", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let parsed = body_json(app.clone().oneshot(get("/api/coop")).await.unwrap()).await;
    assert_eq!(parsed["status"], "opened");
    assert_eq!(parsed["automatic"], true);

    // Manual control is locked out again.
    let response = app.oneshot(post("/api/coop/close", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
