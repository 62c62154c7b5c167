use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Method};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, converse};
use crate::state::AppState;

/// Maximum accepted request body size. Clips are short; 10 MiB is generous
/// even for uncompressed WAV.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Permissive CORS: the gateway is meant to be called straight from browser
/// recorders on arbitrary origins. The resolved-language header must be
/// exposed for cross-origin callers to read it.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static("x-language")])
}

/// Create the API router.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/converse", post(converse::converse_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
