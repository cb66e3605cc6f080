//! # MLDCAT HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /old/datasets/{id}` - Dataset description in the legacy shape
//! - `GET /datasets/{id}` - Canonical dataset record
//! - `GET /mldcat_ap/datasets/{id}` - MLDCAT-AP JSON-LD graph of a dataset
//!
//! Every dataset endpoint accepts `?api_key=` to identify the caller.
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `MLDCAT_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `MLDCAT_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::ApiKeys;
pub use handlers::{
    ApiError, Family, dataset_handler, health_handler, legacy_dataset, mldcat_ap_handler,
    old_dataset_handler,
};
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{DatasetQuery, ErrorDetail, ErrorResponse, HealthResponse};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use mldcat_core::{DatasetStore, GraphBuilder, MldcatError};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Where dataset records come from.
    pub store: Arc<dyn DatasetStore>,
    /// Configured callers.
    pub keys: Arc<ApiKeys>,
    /// Builder for `/mldcat_ap` graphs.
    pub builder: Arc<GraphBuilder>,
}

impl AppState {
    /// State with the default graph builder.
    #[must_use]
    pub fn new(store: impl DatasetStore + 'static, keys: ApiKeys) -> Self {
        Self {
            store: Arc::new(store),
            keys: Arc::new(keys),
            builder: Arc::new(GraphBuilder::default()),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: GraphBuilder) -> Self {
        self.builder = Arc::new(builder);
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `MLDCAT_CORS_ORIGINS`.
///
/// - `*`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MLDCAT_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (MLDCAT_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in MLDCAT_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            }
        }
        None => {
            tracing::info!("CORS: No MLDCAT_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8000",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8000",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global request budget (if enabled)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();

    if state.keys.is_empty() {
        tracing::info!("No users configured, every caller is anonymous");
    } else {
        tracing::info!("{} API key(s) configured", state.keys.len());
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/old/datasets/{id}", get(handlers::old_dataset_handler))
        .route("/datasets/{id}", get(handlers::dataset_handler))
        .route("/mldcat_ap/datasets/{id}", get(handlers::mldcat_ap_handler));

    if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer()),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and serve until ctrl-c.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), MldcatError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MldcatError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("MLDCAT HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MldcatError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
