//! Router construction.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Build the gateway router: API routes first, static bundle as fallback.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Worker-backed routes
        .route("/api/maps/generate", post(handlers::maps::generate_handler))
        .route("/api/maps/sample", post(handlers::maps::sample_handler))
        // Catalog
        .route("/api/maps/sources", get(handlers::catalog::sources_handler))
        .route(
            "/api/maps/variables",
            get(handlers::catalog::variables_handler),
        )
        .route(
            "/api/maps/pressure-levels",
            get(handlers::catalog::pressure_levels_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Browser bundle
        .fallback_service(static_files)
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
