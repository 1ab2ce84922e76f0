use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::SharedState};

/// Create the main application router with all API endpoints
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/cities", get(handlers::list_cities))
        .route("/api/compare", get(handlers::compare_cities))
        .route("/api/aqi", post(handlers::standardize_aqi))
        .route("/api/aqi/normalize", get(handlers::normalize_aqi))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
