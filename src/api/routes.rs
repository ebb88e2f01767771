//! Application route configuration.

use std::time::Duration;

use axum::{http::Request, response::Json, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

use super::handlers::{health_routes, user_routes};
use super::middleware::cors_layer;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{API_PREFIX, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Create the application router with the default request timeout
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
}

/// Create the application router with all routes configured
pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest(
            API_PREFIX,
            Router::new()
                .merge(health_routes())
                .nest("/users", user_routes()),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        // Global middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
        .with_state(state)
}

/// Serve the generated OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
