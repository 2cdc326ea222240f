//! Static service catalog endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use frombuddy_common::catalog::ServiceDescriptor;

use crate::{ApiResult, AppState};

/// GET /api/services
///
/// Entries that fail to parse are skipped.
pub async fn list_services(State(state): State<AppState>) -> ApiResult<Json<Vec<ServiceDescriptor>>> {
    let services = state.catalog.list().await?;
    Ok(Json(services))
}

/// GET /api/services/:id
///
/// Returns the raw catalog document. The id is reduced to a bare file name before
/// lookup.
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let service = state.catalog.get(&id).await?;
    Ok(Json(service))
}

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/api/services", get(list_services))
        .route("/api/services/:id", get(get_service))
}
