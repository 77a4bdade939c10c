//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store = state.provider.health_check().await;

    let (status, label, database) = if store.reachable {
        (StatusCode::OK, "ok", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    let body = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.provider.kind().to_string(),
        database: database.to_string(),
        database_latency_ms: store.latency.map(|d| d.as_millis() as u64),
        database_error: store.error,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        checked_at: Utc::now(),
    };

    (status, Json(ApiResponse::ok(body)))
}
