//! Health check handler.

use axum::{response::Json, routing::get, Router};

use crate::api::AppState;
use crate::config::{SERVICE_NAME, SERVICE_VERSION};
use crate::types::HealthResponse;

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe; the store is in-process, so being up means being healthy.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}
