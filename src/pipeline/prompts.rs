//! Prompt construction for the classifier and generator boundaries.

use crate::pipeline::types::{DraftParams, Item};

/// Max metadata chars included in the triage prompt.
const METADATA_BUDGET: usize = 800;

/// Max content chars included in the triage prompt.
const CONTENT_BUDGET: usize = 8000;

/// Build the triage system prompt — the JSON contract and rules of thumb.
pub fn build_triage_system_prompt(stale_days: u32) -> String {
    format!(
        "You are EchoDraft's triage agent. Decide how to handle an incoming item.\n\n\
         Return ONLY one JSON object with fields:\n\
         {{\"label\": \"IGNORE|NOTIFY|DRAFT_EMAIL|DRAFT_NOTION|DRAFT_LINKEDIN|REVIEW\", \
         \"reason\": \"<short reason>\", \"confidence\": 0.0}}\n\n\
         Rules of thumb:\n\
         - Email: if a reply draft is started or a response is clearly needed, DRAFT_EMAIL.\n\
         - Email: marketing/newsletters/auto-notices are IGNORE or NOTIFY depending on relevance.\n\
         - Notion: if structure suggests an incomplete proposal/brief/PRD, DRAFT_NOTION.\n\
         - LinkedIn/Blog: bullet-only with a clear topic or CTA, DRAFT_LINKEDIN; else IGNORE.\n\
         - If sensitive, uncertain, or lacking facts, REVIEW.\n\
         - If the item is older than {stale_days} days without activity, IGNORE.\n\
         - If the content includes '#echodraft', prefer a DRAFT_* label for that surface."
    )
}

/// Build the triage user prompt from an item.
pub fn build_triage_user_prompt(item: &Item) -> String {
    let metadata = serde_json::to_string(&item.metadata).unwrap_or_default();
    let metadata: String = metadata.chars().take(METADATA_BUDGET).collect();
    let content: String = item.content.chars().take(CONTENT_BUDGET).collect();

    let mut prompt = String::with_capacity(512);
    prompt.push_str(&format!("Surface: {}\n", item.surface));
    prompt.push_str(&format!("Title: {}\n", item.title));
    prompt.push_str(&format!("Age in days: {}\n", item.stale_days));
    if metadata != "{}" {
        prompt.push_str(&format!("Metadata: {metadata}\n"));
    }
    prompt.push_str(&format!("\nContent:\n\"\"\"{content}\"\"\""));
    prompt
}

/// Build the drafting prompt from parameters and rendered personalization.
pub fn build_draft_prompt(params: &DraftParams, personalization: &str) -> String {
    let taboos = if params.taboos.is_empty() {
        "None".to_string()
    } else {
        params.taboos.join(", ")
    };
    let expectations = if params.expectations.is_empty() {
        "None".to_string()
    } else {
        params.expectations.join("; ")
    };

    format!(
        "You are EchoDraft, a concise writing assistant.\n\
         Write a clear, fluent draft about: {topic}\n\
         Style: {style}\n\
         Target length: {words} words.\n\
         Avoid taboo phrases if any are provided: {taboos}\n\
         Reader expectations: {expectations}\n\
         Personal style rules:\n{personalization}",
        topic = params.topic,
        style = params.style,
        words = params.words,
    )
}

/// The explanation prompt. Stateless — follows the draft in the same session.
pub fn explain_prompt() -> &'static str {
    "Explain (2-3 sentences) the main stylistic choices you made for this draft \
     so the user understands why it fits the requested style."
}

/// Build the revision prompt from an existing draft and human feedback.
pub fn build_revise_prompt(draft: &str, feedback: &str) -> String {
    format!(
        "You are a careful rewrite assistant.\n\
         Revise the draft based on the FEEDBACK. Follow these rules:\n\
         - Apply feedback faithfully (tone, brevity, clarity).\n\
         - Preserve structure and Markdown formatting (headings, lists, signatures).\n\
         - Do NOT leave incomplete sentences or placeholders.\n\
         - Return ONLY the full revised draft (no preamble, no commentary).\n\n\
         FEEDBACK:\n\"{feedback}\"\n\n\
         DRAFT:\n<<<\n{draft}\n>>>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Surface;

    #[test]
    fn triage_system_prompt_lists_labels_and_staleness() {
        let prompt = build_triage_system_prompt(30);
        for label in ["IGNORE", "NOTIFY", "DRAFT_EMAIL", "DRAFT_NOTION", "DRAFT_LINKEDIN", "REVIEW"]
        {
            assert!(prompt.contains(label), "missing {label}");
        }
        assert!(prompt.contains("older than 30 days"));
        assert!(prompt.contains("#echodraft"));
    }

    #[test]
    fn triage_user_prompt_includes_item_fields() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("sender".into(), serde_json::Value::String("alice@x.com".into()));
        let item = Item {
            surface: Surface::Notion,
            title: "Q3 brief".into(),
            content: "- goal\n- owners tbd".into(),
            metadata,
            stale_days: 4,
        };
        let prompt = build_triage_user_prompt(&item);
        assert!(prompt.contains("Surface: notion"));
        assert!(prompt.contains("Q3 brief"));
        assert!(prompt.contains("Age in days: 4"));
        assert!(prompt.contains("alice@x.com"));
        assert!(prompt.contains("owners tbd"));
    }

    #[test]
    fn triage_user_prompt_truncates_long_content() {
        let item = Item {
            surface: Surface::Blog,
            title: "t".into(),
            content: "x".repeat(20_000),
            metadata: serde_json::Map::new(),
            stale_days: 0,
        };
        let prompt = build_triage_user_prompt(&item);
        assert!(prompt.len() < 9_000);
    }

    #[test]
    fn draft_prompt_carries_all_knobs() {
        let params = DraftParams {
            topic: "launch recap".into(),
            style: "story".into(),
            words: 150,
            taboos: vec!["synergy".into()],
            expectations: vec!["mention the beta users".into()],
            explain: false,
        };
        let prompt = build_draft_prompt(&params, "Avoid these phrases: \"We should\"");
        assert!(prompt.contains("launch recap"));
        assert!(prompt.contains("Style: story"));
        assert!(prompt.contains("150 words"));
        assert!(prompt.contains("synergy"));
        assert!(prompt.contains("beta users"));
        assert!(prompt.contains("Avoid these phrases"));
    }

    #[test]
    fn draft_prompt_defaults_empty_lists_to_none() {
        let params = DraftParams::new("topic");
        let prompt = build_draft_prompt(&params, "None");
        assert!(prompt.contains("taboo phrases if any are provided: None"));
        assert!(prompt.contains("Reader expectations: None"));
    }

    #[test]
    fn revise_prompt_embeds_feedback_and_draft() {
        let prompt = build_revise_prompt("Original draft.", "too formal, add example");
        assert!(prompt.contains("too formal, add example"));
        assert!(prompt.contains("Original draft."));
    }
}
