//! Router tests for paths that are answered before any query runs.
//! The pool connects lazily and points nowhere, so a test that reached the database would fail.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use superheroes::{app, AppState};
use tower::ServiceExt;

fn router() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
        .unwrap();
    app(AppState { pool }, 1024)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    let body = body.to_string();
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn mighty_strength_is_rejected_with_400() {
    let (status, body) = send(json_request(
        "POST",
        "/hero_powers",
        json!({ "strength": "Mighty", "hero_id": 1, "power_id": 2 }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["strength must be one of: Strong, Weak, Average"] })
    );
}

#[tokio::test]
async fn missing_hero_power_fields_are_all_reported() {
    let (status, body) = send(json_request("POST", "/hero_powers", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["strength is required", "hero_id is required", "power_id is required"] })
    );
}

#[tokio::test]
async fn malformed_json_is_a_400_with_errors() {
    let request = Request::builder()
        .method("POST")
        .uri("/hero_powers")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn mistyped_id_field_is_a_400() {
    let (status, body) = send(json_request(
        "POST",
        "/hero_powers",
        json!({ "strength": "Strong", "hero_id": "one", "power_id": 2 }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn non_integer_hero_id_is_not_found() {
    let request = Request::builder().uri("/heroes/abc").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Hero not found" }));
}

#[tokio::test]
async fn non_integer_power_id_is_not_found_on_patch() {
    let (status, body) = send(json_request(
        "PATCH",
        "/powers/abc",
        json!({ "description": "a perfectly long enough description" }),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Power not found" }));
}

#[tokio::test]
async fn non_integer_power_id_wins_over_malformed_patch_body() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/powers/abc")
        .header("content-type", "application/json")
        .body(Body::from("{bad"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Power not found" }));
}

#[tokio::test]
async fn health_does_not_need_the_database() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ready_reports_unavailable_database() {
    let (status, body) = send(Request::builder().uri("/ready").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], json!("unavailable"));
    assert!(body.get("schema_version").is_none());
    assert_eq!(body["expected_schema_version"], json!(1));
}

#[tokio::test]
async fn index_serves_html() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Code challenge</h1>");
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let padding = "x".repeat(4096);
    let (status, _) = send(json_request(
        "POST",
        "/hero_powers",
        json!({ "strength": "Strong", "hero_id": 1, "power_id": 2, "padding": padding }),
    ))
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
