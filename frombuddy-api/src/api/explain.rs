//! Guided explanation endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::post,
    Json, Router,
};
use frombuddy_common::GuideData;
use serde::Deserialize;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState};

/// Query string of `POST /api/explain`
#[derive(Debug, Deserialize)]
pub struct ExplainParams {
    pub query: String,
}

/// POST /api/explain?query=...
///
/// 400 with the refusal message when the guardrail blocks the query; otherwise
/// always 200 with a guide, generated or fallback (`name: "Error"`).
pub async fn explain(
    State(state): State<AppState>,
    params: Result<Query<ExplainParams>, QueryRejection>,
) -> ApiResult<Json<GuideData>> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let outcome = state
        .pipeline
        .explain(&params.query)
        .instrument(info_span!("explain", %request_id))
        .await
        .map_err(|blocked| ApiError::BadRequest(blocked.reason.to_string()))?;

    debug!(%request_id, fallback = outcome.is_fallback(), "Explain request complete");
    Ok(Json(outcome.into_guide()))
}

pub fn explain_routes() -> Router<AppState> {
    Router::new().route("/api/explain", post(explain))
}
