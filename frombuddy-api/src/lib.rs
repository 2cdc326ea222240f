//! frombuddy-api library interface
//!
//! Exposes the explanation pipeline and the HTTP router for the binary and for
//! integration testing.

pub mod api;
pub mod error;
pub mod fallback;
pub mod generation;
pub mod guardrail;
pub mod pipeline;
pub mod prompt;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use frombuddy_common::catalog::ServiceCatalog;
use pipeline::ExplanationPipeline;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Guardrail, prompt assembly, generation and fallback
    pub pipeline: Arc<ExplanationPipeline>,
    /// Read-only static service catalog
    pub catalog: ServiceCatalog,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: ExplanationPipeline, catalog: ServiceCatalog) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            catalog,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Cross-origin access is limited to `allowed_origins`, `GET`/`POST` only, with
/// credentials allowed.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(api::root_routes())
        .merge(api::service_routes())
        .merge(api::explain_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Locate the service catalog directory
///
/// Absolute paths and relative paths that exist under the working directory are
/// used as given. A relative path missing from the working directory is looked up
/// next to this crate's manifest, where the bundled `data/services` lives; if it
/// is missing there too the original path is kept.
pub fn resolve_services_dir(configured: &Path) -> PathBuf {
    if configured.is_absolute() || configured.exists() {
        return configured.to_path_buf();
    }

    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(configured);
    if bundled.is_dir() {
        bundled
    } else {
        configured.to_path_buf()
    }
}

/// CORS layer for an explicit origin allow-list
///
/// Origins that are not valid header values are logged and ignored.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
