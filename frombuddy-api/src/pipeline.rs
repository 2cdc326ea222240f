//! Explanation pipeline
//!
//! Per request: screen the query, assemble the prompt, generate, and on any
//! generation failure substitute the fallback guide. The only error a caller can
//! see is a guardrail refusal.

use crate::fallback;
use crate::generation::GuideGenerator;
use crate::guardrail::{Guardrail, Verdict};
use crate::prompt::PromptAssembler;
use frombuddy_common::GuideData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The query contained a blocked identifier term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct GuardrailBlocked {
    pub reason: &'static str,
}

/// Terminal outcome of an allowed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// The backend produced a validated guide
    Generated(GuideData),
    /// Generation failed; the fallback guide stands in
    Fallback(GuideData),
}

impl Explanation {
    pub fn guide(&self) -> &GuideData {
        match self {
            Explanation::Generated(guide) | Explanation::Fallback(guide) => guide,
        }
    }

    pub fn into_guide(self) -> GuideData {
        match self {
            Explanation::Generated(guide) | Explanation::Fallback(guide) => guide,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Explanation::Fallback(_))
    }
}

/// Stateless orchestrator; shared across requests behind an `Arc`
pub struct ExplanationPipeline {
    guardrail: Guardrail,
    prompts: PromptAssembler,
    generator: Arc<dyn GuideGenerator>,
}

impl ExplanationPipeline {
    pub fn new(
        guardrail: Guardrail,
        prompts: PromptAssembler,
        generator: Arc<dyn GuideGenerator>,
    ) -> Self {
        Self {
            guardrail,
            prompts,
            generator,
        }
    }

    pub fn generator(&self) -> &dyn GuideGenerator {
        self.generator.as_ref()
    }

    /// Run one query through the pipeline
    pub async fn explain(&self, query: &str) -> Result<Explanation, GuardrailBlocked> {
        if let Verdict::Blocked { reason } = self.guardrail.check(query) {
            // The query itself is never logged
            info!("Query refused by guardrail");
            return Err(GuardrailBlocked { reason });
        }

        let payload = self.prompts.build(query);
        info!(
            query_length = query.len(),
            backend = self.generator.name(),
            "Generating guide"
        );

        match self.generator.generate(&payload).await {
            Ok(guide) => {
                info!(steps = guide.steps.len(), checklist = guide.checklist.len(), "Guide generated");
                if guide.is_explanation_only() {
                    debug!("Query is not about a procedure, returning explanation only");
                }
                Ok(Explanation::Generated(guide))
            }
            Err(e) => {
                warn!("Guide generation failed, returning fallback: {}", e);
                Ok(Explanation::Fallback(fallback::compose()))
            }
        }
    }
}
