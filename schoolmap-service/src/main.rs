//! schoolmap-service - HTTP microservice listing schools by distance.
//!
//! Stores school locations and returns them sorted by great-circle distance
//! from a caller-supplied coordinate.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PORT` | HTTP server port | 5000 |
//! | `DB_HOST` | MySQL host (unset: in-memory store) | None |
//! | `DB_PORT` | MySQL port | 3306 |
//! | `DB_USER` | MySQL user | "root" |
//! | `DB_PASSWORD` | MySQL password | "" |
//! | `DB_NAME` | MySQL database | "schools" |
//! | `DB_POOL_SIZE` | Maximum pooled connections | 5 |
//! | `DB_TIMEOUT_SECS` | Bound on each store call | 5 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! Variables are also read from a `.env` file in the working directory.
//!
//! ## Endpoints
//!
//! - `POST /addSchool` - Add a school
//! - `GET /listSchools?latitude=X&longitude=Y` - Schools sorted by distance
//! - `GET /listSchools/geojson?latitude=X&longitude=Y` - Same, as GeoJSON
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use schoolmap::{MemoryStore, SchoolStore};
use schoolmap_service::{handlers, router, AppState, MySqlStore, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the schoolmap service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "schoolmap Service",
        version = "0.1.0",
        description = "REST API for storing schools and listing them by distance.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::add_school,
        handlers::list_schools,
        handlers::list_schools_geojson,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::AddSchoolRequest,
            handlers::AddSchoolResponse,
            handlers::SchoolResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "schools", description = "School storage and proximity endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schoolmap_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();

    let store: Arc<dyn SchoolStore> = match &config.database {
        Some(db) => {
            tracing::info!(
                host = %db.host,
                port = db.port,
                database = %db.name,
                user = %db.user,
                pool_size = db.pool_size,
                "Using MySQL store"
            );
            let store = MySqlStore::connect_lazy(db, config.store_timeout);
            match store.ensure_schema().await {
                Ok(()) => tracing::info!("Connected to MySQL database"),
                Err(e) => tracing::error!(error = %e, "Database connection failed"),
            }
            Arc::new(store)
        }
        None => {
            tracing::warn!("DB_HOST not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(
        port = config.port,
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Starting schoolmap service"
    );

    let state = Arc::new(AppState::new(store).with_store_timeout(config.store_timeout));

    // Build router
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(router(state));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
