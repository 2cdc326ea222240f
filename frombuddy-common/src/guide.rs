//! Guide data model
//!
//! `GuideData` is the only shape the explanation endpoint ever returns, whether the
//! guide came from the generation backend or from the fallback path.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One step of a procedure guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStep {
    /// Step number, positive; unique and ascending from 1 by convention
    pub step_id: u32,
    /// Short title of the step
    pub title: String,
    /// What the user has to do
    pub description: String,
    /// Helpful tip or extra detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Structured step-by-step guide for an administrative procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideData {
    /// Name of the service or process
    pub name: String,
    /// Ordered steps (empty when the query is not about a procedure)
    pub steps: Vec<GuideStep>,
    /// Required documents or prerequisites
    pub checklist: Vec<String>,
    /// Official portal URL, `"#"` when unknown
    pub official_link: String,
    /// Conversational summary of the process
    pub explanation: String,
}

/// Placeholder used for `official_link` when no portal is known
pub const UNKNOWN_LINK: &str = "#";

impl GuideData {
    /// Check the rules serde cannot express on its own
    ///
    /// Field presence and types are already enforced by deserialization; this adds
    /// the value-level rule for step ids, which must be positive. `name` may be
    /// empty: explanation-only guides carry just the `explanation`.
    pub fn validate(&self) -> Result<()> {
        if let Some(step) = self.steps.iter().find(|s| s.step_id == 0) {
            return Err(Error::InvalidInput(format!(
                "step '{}' has step_id 0 (step ids start at 1)",
                step.title
            )));
        }

        Ok(())
    }

    /// Parse a JSON document into a validated guide
    pub fn from_json_str(text: &str) -> Result<Self> {
        let guide: GuideData = serde_json::from_str(text)?;
        guide.validate()?;
        Ok(guide)
    }

    /// True when step ids run 1, 2, 3, ... without gaps or duplicates
    pub fn has_sequential_step_ids(&self) -> bool {
        self.steps
            .iter()
            .enumerate()
            .all(|(i, step)| step.step_id as usize == i + 1)
    }

    /// True when the guide carries no procedure (explanation only)
    pub fn is_explanation_only(&self) -> bool {
        self.steps.is_empty() && self.checklist.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passport_guide() -> serde_json::Value {
        json!({
            "name": "Passport Application",
            "steps": [
                {"step_id": 1, "title": "Register", "description": "Create an account", "details": "Use your email"},
                {"step_id": 2, "title": "Apply", "description": "Fill the form", "details": null}
            ],
            "checklist": ["Proof of address", "Proof of birth"],
            "official_link": "https://www.passportindia.gov.in",
            "explanation": "Apply online and visit the nearest office."
        })
    }

    #[test]
    fn test_parses_valid_guide() {
        let guide = GuideData::from_json_str(&passport_guide().to_string()).unwrap();
        assert_eq!(guide.steps.len(), 2);
        assert_eq!(guide.steps[0].details.as_deref(), Some("Use your email"));
        assert_eq!(guide.steps[1].details, None);
        assert!(guide.has_sequential_step_ids());
    }

    #[test]
    fn test_details_may_be_absent() {
        let mut value = passport_guide();
        value["steps"][0].as_object_mut().unwrap().remove("details");
        let guide = GuideData::from_json_str(&value.to_string()).unwrap();
        assert_eq!(guide.steps[0].details, None);
    }

    #[test]
    fn test_rejects_missing_field() {
        let mut value = passport_guide();
        value.as_object_mut().unwrap().remove("checklist");
        assert!(GuideData::from_json_str(&value.to_string()).is_err());
    }

    #[test]
    fn test_rejects_scalar_steps() {
        let mut value = passport_guide();
        value["steps"] = json!("1. Register 2. Apply");
        assert!(GuideData::from_json_str(&value.to_string()).is_err());
    }

    #[test]
    fn test_rejects_scalar_checklist() {
        let mut value = passport_guide();
        value["checklist"] = json!("Proof of address");
        assert!(GuideData::from_json_str(&value.to_string()).is_err());
    }

    #[test]
    fn test_rejects_non_positive_step_id() {
        let mut value = passport_guide();
        value["steps"][0]["step_id"] = json!(0);
        assert!(matches!(
            GuideData::from_json_str(&value.to_string()),
            Err(Error::InvalidInput(_))
        ));

        value["steps"][0]["step_id"] = json!(-1);
        assert!(matches!(
            GuideData::from_json_str(&value.to_string()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_empty_name_explanation_only_is_valid() {
        let value = json!({
            "name": "",
            "steps": [],
            "checklist": [],
            "official_link": "#",
            "explanation": "Hello! Ask me about a government service."
        });
        let guide = GuideData::from_json_str(&value.to_string()).unwrap();
        assert!(guide.is_explanation_only());
        assert_eq!(guide.name, "");
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let mut value = passport_guide();
        value["confidence"] = json!(0.9);
        assert!(GuideData::from_json_str(&value.to_string()).is_ok());
    }

    #[test]
    fn test_duplicate_step_ids_accepted_but_not_sequential() {
        let mut value = passport_guide();
        value["steps"][1]["step_id"] = json!(1);
        let guide = GuideData::from_json_str(&value.to_string()).unwrap();
        assert!(!guide.has_sequential_step_ids());
    }

    #[test]
    fn test_explanation_only() {
        let guide = GuideData {
            name: "Greeting".to_string(),
            steps: vec![],
            checklist: vec![],
            official_link: UNKNOWN_LINK.to_string(),
            explanation: "Hello! Ask me about a government service.".to_string(),
        };
        assert!(guide.is_explanation_only());
        assert!(guide.validate().is_ok());
    }
}
