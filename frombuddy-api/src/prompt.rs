//! Prompt assembly
//!
//! The system instruction and the schema description are fixed text built once at
//! startup; only the user message varies with the query.

use serde_json::{json, Value};

/// Role and output rules for the assistant
const SYSTEM_INSTRUCTIONS: &str = "\
You are FROMBUDDY, an AI assistant for Indian Government Services.
Your goal is to provide a structured guide for the user's request.

INSTRUCTIONS:
1. Analyze the user's query (e.g., \"How to apply for Passport\").
2. Create a specific, accurate step-by-step guide.
3. Create a document checklist.
4. Provide a polite conversational explanation.
5. Output ONLY a single JSON object matching the schema below. No prose, no Markdown.

RULES:
- If the query is NOT about a government service or procedure (e.g. \"hello\"), return empty \
\"steps\" and \"checklist\" arrays and populate only \"explanation\".
- Do NOT generate fake personal data.
- \"official_link\" must be a real URL if you know it (e.g. uidai.gov.in), otherwise the string \"#\".
- Number steps with \"step_id\" starting at 1, ascending, without duplicates.";

/// Payload sent to the generation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    /// Instructions plus schema description
    pub system: String,
    /// The user's query, verbatim
    pub user: String,
}

/// Builds prompt payloads from queries
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAssembler {
    pub fn new() -> Self {
        let schema = serde_json::to_string_pretty(&guide_schema())
            .unwrap_or_else(|_| guide_schema().to_string());

        let system = format!(
            "{}\n\nSCHEMA:\nThe output must be a JSON instance that conforms to this JSON schema:\n```\n{}\n```",
            SYSTEM_INSTRUCTIONS, schema
        );

        Self { system }
    }

    /// The fixed system block shared by every payload
    pub fn system_text(&self) -> &str {
        &self.system
    }

    pub fn build(&self, query: &str) -> PromptPayload {
        PromptPayload {
            system: self.system.clone(),
            user: query.to_string(),
        }
    }
}

/// Machine-readable description of the guide shape, with per-field intent
pub fn guide_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name", "steps", "checklist", "official_link", "explanation"],
        "properties": {
            "name": {
                "type": "string",
                "description": "Name of the service or process"
            },
            "steps": {
                "type": "array",
                "description": "List of steps to complete the process",
                "items": {
                    "type": "object",
                    "required": ["step_id", "title", "description"],
                    "properties": {
                        "step_id": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "The step number"
                        },
                        "title": {
                            "type": "string",
                            "description": "Short title of the step"
                        },
                        "description": {
                            "type": "string",
                            "description": "Detailed description of what to do"
                        },
                        "details": {
                            "type": ["string", "null"],
                            "description": "Helpful tip or extra detail"
                        }
                    }
                }
            },
            "checklist": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of required documents or prerequisites"
            },
            "official_link": {
                "type": "string",
                "description": "URL to the official government portal if known, else \"#\""
            },
            "explanation": {
                "type": "string",
                "description": "A conversational summary of the process"
            }
        }
    })
}
