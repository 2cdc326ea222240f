//! Groq chat-completions backend
//!
//! Uses the OpenAI-compatible `/chat/completions` endpoint in JSON mode with a low
//! temperature. Each attempt is bounded by the client timeout; transient failures
//! are retried up to `max_retries` times with linear backoff.
//!
//! API docs: https://console.groq.com/docs/api-reference

use super::parse::preview;
use super::{parse_guide, GenerationFailed, GuideGenerator};
use crate::prompt::PromptPayload;
use async_trait::async_trait;
use frombuddy_common::config::GenerationConfig;
use frombuddy_common::{Error, GuideData, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before retry N is `RETRY_BACKOFF * N`
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Upper bound on configured retries per request
pub const MAX_RETRIES_CAP: u32 = 3;

/// Groq client for guide generation
pub struct GroqClient {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
    max_retries: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    /// Create a client from configuration and an already-resolved credential
    pub fn new(config: &GenerationConfig, api_key: Option<String>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let max_retries = config.max_retries.min(MAX_RETRIES_CAP);
        if max_retries < config.max_retries {
            warn!(
                configured = config.max_retries,
                cap = MAX_RETRIES_CAP,
                "generation.max_retries exceeds cap, clamping"
            );
        }

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout,
            max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// One request/response round trip, no retries
    async fn attempt(
        &self,
        api_key: &str,
        payload: &PromptPayload,
    ) -> std::result::Result<GuideData, GenerationFailed> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &payload.system,
                },
                ChatMessage {
                    role: "user",
                    content: &payload.user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies can echo the prompt back; keep only a short prefix
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationFailed::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationFailed::MalformedOutput(format!("unexpected response envelope: {}", e))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationFailed::MalformedOutput("response has no message content".to_string()))?;

        debug!(content_length = content.len(), "Received model output");
        parse_guide(&content)
    }

    fn transport_error(&self, e: reqwest::Error) -> GenerationFailed {
        if e.is_timeout() {
            GenerationFailed::Timeout(self.timeout)
        } else {
            GenerationFailed::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl GuideGenerator for GroqClient {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        payload: &PromptPayload,
    ) -> std::result::Result<GuideData, GenerationFailed> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationFailed::MissingCredential)?;

        let mut retries = 0;
        loop {
            match self.attempt(api_key, payload).await {
                Ok(guide) => return Ok(guide),
                Err(e) if e.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    warn!(
                        attempt = retries,
                        max_retries = self.max_retries,
                        "Transient generation failure, retrying: {}",
                        e
                    );
                    tokio::time::sleep(RETRY_BACKOFF * retries).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
