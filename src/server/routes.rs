//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use super::handlers;
use super::AppState;
use crate::assets::ASSET_MOUNT;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let asset_dir = state.assets.dir().to_path_buf();

    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        // Upload form and results
        .route("/", get(handlers::home))
        .route("/upload/", post(handlers::upload_files))
        // Maintenance
        .route("/reset/", get(handlers::reset_app))
        .route("/download-csv/", get(handlers::download_csv))
        // Stored display copies of processed images
        .nest_service(ASSET_MOUNT, ServeDir::new(asset_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
