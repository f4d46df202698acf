//! schoolmap service library
//!
//! HTTP handlers, storage and configuration for the school proximity service.
//! This library is used by both the schoolmap-service binary and integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use schoolmap::SchoolStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers.
pub struct AppState {
    /// Record store for school queries and inserts.
    pub store: Arc<dyn SchoolStore>,
    /// Bound on each store call.
    pub store_timeout: Duration,
}

impl AppState {
    /// Create state around a store, using the default store timeout.
    pub fn new(store: Arc<dyn SchoolStore>) -> Self {
        Self {
            store,
            store_timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the store timeout.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

/// Build the API router with tracing and permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/addSchool", post(handlers::add_school))
        .route("/listSchools", get(handlers::list_schools))
        .route("/listSchools/geojson", get(handlers::list_schools_geojson))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use config::{DatabaseConfig, ServiceConfig};
pub use db::MySqlStore;
pub use error::ApiError;
pub use handlers::{
    AddSchoolRequest, AddSchoolResponse, ErrorResponse, HealthResponse, ListSchoolsQuery,
    SchoolResponse,
};
