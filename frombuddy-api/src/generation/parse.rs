//! Model output parsing
//!
//! Models in JSON mode usually return a bare object, but some still wrap it in a
//! Markdown fence or a sentence of prose. The outermost `{...}` is extracted first;
//! the extracted object is then held to the full guide schema.

use super::GenerationFailed;
use frombuddy_common::GuideData;
use tracing::debug;

/// Parse raw model text into a validated guide
pub fn parse_guide(raw: &str) -> Result<GuideData, GenerationFailed> {
    let candidate = extract_json_object(raw)
        .ok_or_else(|| GenerationFailed::MalformedOutput(format!("no JSON object in output: {}", preview(raw))))?;

    let value: serde_json::Value = serde_json::from_str(candidate)
        .map_err(|e| GenerationFailed::MalformedOutput(e.to_string()))?;

    let guide: GuideData = serde_json::from_value(value)
        .map_err(|e| GenerationFailed::SchemaViolation(e.to_string()))?;

    guide
        .validate()
        .map_err(|e| GenerationFailed::SchemaViolation(e.to_string()))?;

    if !guide.has_sequential_step_ids() {
        debug!(steps = guide.steps.len(), "Guide step ids are not 1..n");
    }

    Ok(guide)
}

/// Slice from the first `{` to the last `}`, if both exist in that order
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// First 120 characters of `raw`, with `...` appended when cut
pub(crate) fn preview(raw: &str) -> String {
    const LIMIT: usize = 120;
    match raw.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}
