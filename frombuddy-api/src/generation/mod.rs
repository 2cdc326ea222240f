//! Structured generation
//!
//! A `GuideGenerator` turns a prompt payload into one validated `GuideData` or
//! fails with `GenerationFailed`. The pipeline treats every failure the same way;
//! the variants exist for logging and tests.

pub mod groq;
pub mod parse;

pub use groq::GroqClient;
pub use parse::parse_guide;

use crate::prompt::PromptPayload;
use async_trait::async_trait;
use frombuddy_common::GuideData;
use std::time::Duration;
use thiserror::Error;

/// Why a generation attempt produced no guide
#[derive(Debug, Error)]
pub enum GenerationFailed {
    /// No credential configured; no request was sent
    #[error("generation backend credential is not configured")]
    MissingCredential,

    /// Could not reach the backend
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend did not answer within the configured bound
    #[error("backend call timed out after {0:?}")]
    Timeout(Duration),

    /// Backend answered with a non-success status
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Output was not well-formed JSON
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// Output was JSON but not a valid guide
    #[error("model output violates guide schema: {0}")]
    SchemaViolation(String),
}

impl GenerationFailed {
    /// Failures worth another attempt: transport, timeout, 429 and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationFailed::Transport(_) | GenerationFailed::Timeout(_) => true,
            GenerationFailed::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Capability interface for schema-constrained generation
#[async_trait]
pub trait GuideGenerator: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Whether the backend can be called at all (credential present)
    fn is_configured(&self) -> bool {
        true
    }

    /// Produce one validated guide, or fail once
    async fn generate(&self, payload: &PromptPayload) -> Result<GuideData, GenerationFailed>;
}
