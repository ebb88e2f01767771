//! CORS policy for browser clients.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the API with the CRUD verbs.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
