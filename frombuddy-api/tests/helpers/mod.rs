//! Shared test helpers: deterministic generators and guide fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use frombuddy_api::generation::{parse_guide, GenerationFailed, GuideGenerator};
use frombuddy_api::prompt::PromptPayload;
use frombuddy_common::{GuideData, GuideStep};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A complete passport guide
pub fn passport_guide() -> GuideData {
    GuideData {
        name: "Passport Application".to_string(),
        steps: vec![
            GuideStep {
                step_id: 1,
                title: "Register on Passport Seva".to_string(),
                description: "Create an account on the Passport Seva portal.".to_string(),
                details: Some("Use an email you check regularly.".to_string()),
            },
            GuideStep {
                step_id: 2,
                title: "Book an appointment".to_string(),
                description: "Pay the fee and book a slot at a Passport Seva Kendra.".to_string(),
                details: None,
            },
        ],
        checklist: vec![
            "Proof of address".to_string(),
            "Proof of date of birth".to_string(),
        ],
        official_link: "https://www.passportindia.gov.in".to_string(),
        explanation: "Register online, book an appointment and visit the Kendra with originals."
            .to_string(),
    }
}

/// Returns a fixed guide and counts calls
#[derive(Default)]
pub struct StaticGenerator {
    pub calls: AtomicUsize,
    pub last_user_message: std::sync::Mutex<Option<String>>,
}

impl StaticGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuideGenerator for StaticGenerator {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn generate(&self, payload: &PromptPayload) -> Result<GuideData, GenerationFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_message.lock().unwrap() = Some(payload.user.clone());
        Ok(passport_guide())
    }
}

/// Always fails the way an unreachable backend does, and counts calls
#[derive(Default)]
pub struct UnreachableGenerator {
    pub calls: AtomicUsize,
}

impl UnreachableGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuideGenerator for UnreachableGenerator {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _payload: &PromptPayload) -> Result<GuideData, GenerationFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationFailed::Transport("connection refused".to_string()))
    }
}

/// Feeds fixed model text through the real output parser
pub struct RawOutputGenerator {
    pub raw: String,
}

#[async_trait]
impl GuideGenerator for RawOutputGenerator {
    fn name(&self) -> &'static str {
        "raw"
    }

    async fn generate(&self, _payload: &PromptPayload) -> Result<GuideData, GenerationFailed> {
        parse_guide(&self.raw)
    }
}

pub fn raw_output_generator(raw: &str) -> Arc<RawOutputGenerator> {
    Arc::new(RawOutputGenerator {
        raw: raw.to_string(),
    })
}

pub fn static_generator() -> Arc<StaticGenerator> {
    Arc::new(StaticGenerator::default())
}

pub fn unreachable_generator() -> Arc<UnreachableGenerator> {
    Arc::new(UnreachableGenerator::default())
}
