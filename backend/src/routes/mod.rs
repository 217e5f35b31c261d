//! Route definitions for the Rice Quality Analyzer

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analysis sessions
        .nest("/sessions", session_routes())
}

/// Analysis session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_session))
        .route("/:session_id", delete(handlers::discard_session))
        .route("/:session_id/image", put(handlers::upload_image))
        .route(
            "/:session_id/analysis",
            post(handlers::analyze).delete(handlers::clear_analysis),
        )
        .route("/:session_id/report", get(handlers::get_report))
        .route("/:session_id/report/document", get(handlers::download_report))
}
