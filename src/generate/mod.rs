//! Generator boundary — drafting, explanation, and revision.
//!
//! Two implementations: [`LlmGenerator`] over an [`LlmProvider`], and
//! [`ScaffoldGenerator`], an offline deterministic drafter used as the
//! no-API fallback and in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GenerateError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::prompts::{build_draft_prompt, build_revise_prompt, explain_prompt};
use crate::pipeline::types::DraftParams;

/// Max tokens for a draft call.
const DRAFT_MAX_TOKENS: u32 = 500;

/// Temperature for drafting.
const DRAFT_TEMPERATURE: f32 = 0.7;

/// Max tokens for a revision call (revisions may grow the text).
const REVISE_MAX_TOKENS: u32 = 700;

/// Temperature for revision (stays close to the original).
const REVISE_TEMPERATURE: f32 = 0.4;

/// Boundary trait for draft generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a draft. `personalization` is the rendered style-rule text.
    async fn draft(
        &self,
        params: &DraftParams,
        personalization: &str,
    ) -> Result<String, GenerateError>;

    /// Explain the stylistic choices of the most recent draft.
    async fn explain(&self) -> Result<String, GenerateError>;

    /// Rewrite a draft according to human feedback.
    async fn revise(&self, draft: &str, feedback: &str) -> Result<String, GenerateError>;
}

// ── LLM-backed generator ────────────────────────────────────────────

pub struct LlmGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl LlmGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    async fn draft(
        &self,
        params: &DraftParams,
        personalization: &str,
    ) -> Result<String, GenerateError> {
        let prompt = build_draft_prompt(params, personalization);
        let request = CompletionRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(DRAFT_TEMPERATURE)
            .with_max_tokens(DRAFT_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        Ok(response.content.trim().to_string())
    }

    async fn explain(&self) -> Result<String, GenerateError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(explain_prompt())])
            .with_temperature(DRAFT_TEMPERATURE)
            .with_max_tokens(DRAFT_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        Ok(response.content.trim().to_string())
    }

    async fn revise(&self, draft: &str, feedback: &str) -> Result<String, GenerateError> {
        let prompt = build_revise_prompt(draft, feedback);
        let request = CompletionRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(REVISE_TEMPERATURE)
            .with_max_tokens(REVISE_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        Ok(response.content.trim().to_string())
    }
}

// ── Offline scaffold generator ──────────────────────────────────────

/// Style presets: (tone description, transitional cues).
const STYLES: [(&str, &str, [&str; 3]); 3] = [
    (
        "professional",
        "clear, concise, structured",
        ["First, ", "Next, ", "Finally, "],
    ),
    (
        "persuasive",
        "confident, benefit-led, action-oriented",
        ["Imagine this: ", "Here's why: ", "So what now? "],
    ),
    (
        "story",
        "narrative, vivid, personal",
        ["A moment ago, ", "Then, ", "In the end, "],
    ),
];

/// Words per scaffold paragraph, roughly.
const WORDS_PER_PARAGRAPH: u32 = 90;

/// Deterministic offline drafter with style presets.
///
/// Unknown styles fall back to the professional preset. Revision is a no-op
/// pass-through since there is no model to apply feedback with.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldGenerator;

impl ScaffoldGenerator {
    fn preset(style: &str) -> (&'static str, [&'static str; 3]) {
        STYLES
            .iter()
            .find(|(name, _, _)| *name == style)
            .map(|(_, tone, cues)| (*tone, *cues))
            .unwrap_or((STYLES[0].1, STYLES[0].2))
    }
}

#[async_trait]
impl Generator for ScaffoldGenerator {
    async fn draft(
        &self,
        params: &DraftParams,
        _personalization: &str,
    ) -> Result<String, GenerateError> {
        let (tone, cues) = Self::preset(&params.style);
        let paragraphs = (params.words / WORDS_PER_PARAGRAPH).max(2) as usize;

        let parts: Vec<String> = (0..paragraphs)
            .map(|i| {
                let lead = cues[i % cues.len()];
                format!("{lead}{topic}, written in a {tone} tone.", topic = params.topic)
            })
            .collect();

        debug!(style = %params.style, paragraphs, "Scaffold draft produced");
        Ok(parts.join("\n\n"))
    }

    async fn explain(&self) -> Result<String, GenerateError> {
        Ok("Chose transitional cues and a tone scaffold to match the requested style preset."
            .to_string())
    }

    async fn revise(&self, draft: &str, feedback: &str) -> Result<String, GenerateError> {
        debug!(feedback = %feedback, "Scaffold generator cannot apply feedback; returning draft unchanged");
        Ok(draft.to_string())
    }
}
