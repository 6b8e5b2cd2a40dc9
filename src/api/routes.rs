use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Wardrobe catalog
        .route("/wardrobe", get(handlers::get_wardrobe))
        .route("/wardrobe", post(handlers::add_garment))
        // Weather lookup
        .route("/weather", get(handlers::get_weather))
        // Outfit recommendation
        .route("/recommendations", post(handlers::recommend))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
