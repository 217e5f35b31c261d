//! Rice Quality Analyzer - Backend Server
//!
//! Accepts a rice-grain image upload, forwards it to a hosted vision
//! inference endpoint, and turns the free-form answer into a structured
//! quality report with an on-screen summary and a downloadable PDF.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod session;

pub use config::Config;
pub use session::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub vision: external::VisionClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let vision = external::VisionClient::new(&config.inference);
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
            vision,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Open CORS: the single-page frontend is served separately
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Rice Quality Analyzer API v1.0"
}
