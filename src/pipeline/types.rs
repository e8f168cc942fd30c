//! Shared types for the routing pipeline.

use serde::{Deserialize, Serialize};

/// Which surface an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Email,
    Notion,
    Linkedin,
    Blog,
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Notion => write!(f, "notion"),
            Self::Linkedin => write!(f, "linkedin"),
            Self::Blog => write!(f, "blog"),
        }
    }
}

/// An incoming content item. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Where the item came from.
    pub surface: Surface,
    /// Title or subject line.
    pub title: String,
    /// Free-text body.
    pub content: String,
    /// Arbitrary channel metadata.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Age in days, for staleness triage.
    #[serde(default)]
    pub stale_days: u32,
}

impl Item {
    /// Title and content joined for cue matching.
    pub fn combined_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }
}

// ── Triage ──────────────────────────────────────────────────────────

/// Reason recorded when the classifier response cannot be parsed.
pub const PARSE_ERROR_REASON: &str = "parse_error";

/// Reason recorded when the classifier returned an out-of-enum label.
pub const UNKNOWN_LABEL_REASON: &str = "unknown label from classifier";

/// Validated triage action label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageLabel {
    Ignore,
    Notify,
    DraftEmail,
    DraftNotion,
    DraftLinkedin,
    Review,
}

impl TriageLabel {
    /// All labels, in wire order.
    pub const ALL: [TriageLabel; 6] = [
        Self::Ignore,
        Self::Notify,
        Self::DraftEmail,
        Self::DraftNotion,
        Self::DraftLinkedin,
        Self::Review,
    ];

    /// Wire form, e.g. `DRAFT_EMAIL`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Notify => "NOTIFY",
            Self::DraftEmail => "DRAFT_EMAIL",
            Self::DraftNotion => "DRAFT_NOTION",
            Self::DraftLinkedin => "DRAFT_LINKEDIN",
            Self::Review => "REVIEW",
        }
    }

    /// Parse the wire form, case-insensitively. `None` for out-of-enum labels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "IGNORE" => Some(Self::Ignore),
            "NOTIFY" => Some(Self::Notify),
            "DRAFT_EMAIL" => Some(Self::DraftEmail),
            "DRAFT_NOTION" => Some(Self::DraftNotion),
            "DRAFT_LINKEDIN" => Some(Self::DraftLinkedin),
            "REVIEW" => Some(Self::Review),
            _ => None,
        }
    }

    /// Whether this label selects the draft stage.
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::DraftEmail | Self::DraftNotion | Self::DraftLinkedin)
    }
}

impl std::fmt::Display for TriageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw classifier output before label validation.
///
/// The label stays a free string here so the heuristic overlay and the
/// enum guard can run before anything trusts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageSignal {
    pub label: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub confidence: f32,
}

/// Validated triage decision. Produced once per item, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageDecision {
    pub label: TriageLabel,
    pub reason: String,
    pub confidence: f32,
}

impl TriageDecision {
    /// The safe substitute used when the classifier response is unusable.
    pub fn review_fallback(reason: impl Into<String>) -> Self {
        Self {
            label: TriageLabel::Review,
            reason: reason.into(),
            confidence: 0.0,
        }
    }
}

// ── Drafting ────────────────────────────────────────────────────────

/// Caller-supplied drafting parameters, explicit per stage rather than a
/// loosely-typed state bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftParams {
    /// What to write about. Defaults to the item title when empty.
    pub topic: String,
    /// Style preset (professional/persuasive/story).
    pub style: String,
    /// Target word count.
    pub words: u32,
    /// Phrases the draft must avoid, on top of mined bans.
    #[serde(default)]
    pub taboos: Vec<String>,
    /// Reader expectations to honor.
    #[serde(default)]
    pub expectations: Vec<String>,
    /// Whether to follow the draft with a stylistic explanation.
    #[serde(default)]
    pub explain: bool,
}

impl DraftParams {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style: crate::config::DEFAULT_STYLE.to_string(),
            words: crate::config::DEFAULT_WORDS,
            taboos: Vec::new(),
            expectations: Vec::new(),
            explain: false,
        }
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}

// ── Routing outcome ─────────────────────────────────────────────────

/// Stage the engine routes to after triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Review,
    Draft,
    End,
}

/// Terminal outcome of one pipeline invocation.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// No further action (IGNORE/NOTIFY).
    End,
    /// Queued for human review.
    Review { id: String, status: String },
    /// Draft produced, optionally explained.
    Drafted {
        draft: String,
        explanation: Option<String>,
    },
}

/// Decision plus outcome for one item.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub decision: TriageDecision,
    pub outcome: RouteOutcome,
}
