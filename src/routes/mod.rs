use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::providers::{CatalogSearch, RecommendationSource},
};

pub mod recommendations;
pub mod titles;

/// Shared application state
///
/// Providers are held behind trait objects so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSearch>,
    pub recommender: Arc<dyn RecommendationSource>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        recommender: Arc<dyn RecommendationSource>,
    ) -> Self {
        Self {
            catalog,
            recommender,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        // The browser front-end is served from a different origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles/search", get(titles::search))
        .route("/titles/:kind/:id", get(titles::details))
        .route("/titles/:kind/lists/:list", get(titles::list))
        .route("/recommendations", post(recommendations::recommend))
        .route("/recommendations/resolve", post(recommendations::resolve))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
