//! Static informational endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Response for `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub legal_disclaimer: &'static str,
    pub status: &'static str,
}

/// Response for `GET /legal/disclaimer`
#[derive(Debug, Serialize)]
pub struct DisclaimerResponse {
    pub text: &'static str,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to FROMBUDDY API",
        legal_disclaimer:
            "This is NOT a government website. We do not collect PII. We do not submit forms.",
        status: "active",
    })
}

/// GET /legal/disclaimer
pub async fn legal_disclaimer() -> Json<DisclaimerResponse> {
    Json(DisclaimerResponse {
        text: "FROMBUDDY is a private AI assistant for guidance only. It is not affiliated \
               with the Government of India. No user data is stored. Do not enter PII.",
    })
}

pub fn root_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/legal/disclaimer", get(legal_disclaimer))
}
