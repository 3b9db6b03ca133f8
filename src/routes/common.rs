//! Liveness and readiness. Ready means the database answers and its schema is current.

use crate::migration::{applied_version, latest_version};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    expected_schema_version: i64,
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let expected = latest_version();
    let (code, status, schema_version) = match applied_version(&state.pool).await {
        Ok(v) if v >= expected => (StatusCode::OK, "ok", Some(v)),
        Ok(v) => (StatusCode::SERVICE_UNAVAILABLE, "migrations_pending", Some(v)),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None)
        }
    };
    (
        code,
        Json(Readiness {
            status,
            schema_version,
            expected_schema_version: expected,
        }),
    )
}

/// GET /health, GET /ready.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
