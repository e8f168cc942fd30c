//! Classifier boundary — turns an item into a raw triage signal.
//!
//! The shipped implementation prompts an LLM for a structured JSON verdict
//! and tolerates sloppy output (markdown fences, surrounding prose). A parse
//! failure is reported as [`ClassifyError::Parse`] so the routing engine can
//! substitute its safe REVIEW decision; transport failures propagate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::ClassifyError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::prompts::{build_triage_system_prompt, build_triage_user_prompt};
use crate::pipeline::types::{Item, TriageSignal};

/// Max tokens for the triage call (kept tight — runs on every item).
const TRIAGE_MAX_TOKENS: u32 = 512;

/// Temperature for triage (deterministic).
const TRIAGE_TEMPERATURE: f32 = 0.0;

/// Staleness threshold quoted in the triage prompt.
const TRIAGE_STALE_DAYS: u32 = 30;

/// Boundary trait for classification.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one item into a raw, unvalidated signal.
    async fn classify(&self, item: &Item) -> Result<TriageSignal, ClassifyError>;
}

/// LLM-backed classifier.
pub struct LlmClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl LlmClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, item: &Item) -> Result<TriageSignal, ClassifyError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(build_triage_system_prompt(TRIAGE_STALE_DAYS)),
            ChatMessage::user(build_triage_user_prompt(item)),
        ])
        .with_temperature(TRIAGE_TEMPERATURE)
        .with_max_tokens(TRIAGE_MAX_TOKENS);

        let response = self.llm.complete(request).await?;

        parse_triage_signal(&response.content).map_err(|e| {
            warn!(
                raw_response = %response.content,
                error = %e,
                "Failed to parse triage response"
            );
            e
        })
    }
}

/// Parse a raw model response into a triage signal.
pub fn parse_triage_signal(raw: &str) -> Result<TriageSignal, ClassifyError> {
    let json_str = extract_json_object(raw);
    serde_json::from_str(&json_str).map_err(|e| ClassifyError::Parse(e.to_string()))
}

/// Extract a JSON object from LLM output (handles markdown wrapping and
/// surrounding prose).
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && end > start
    {
        return trimmed[start..=end].to_string();
    }

    trimmed.to_string()
}
