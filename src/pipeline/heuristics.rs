//! Deterministic post-processing on raw classifier output.
//!
//! Two passes run between structured-response validation and routing, in
//! this order:
//! 1. NOTIFY cue overlay — an IGNORE verdict on an item that carries an
//!    informational cue phrase becomes NOTIFY with boosted confidence.
//! 2. Label-enum guard — anything outside the six known labels is coerced
//!    to REVIEW with confidence 0.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::{
    Item, TriageDecision, TriageLabel, TriageSignal, UNKNOWN_LABEL_REASON,
};

/// Reason set when the overlay rewrites IGNORE to NOTIFY.
pub const NOTIFY_OVERLAY_REASON: &str =
    "informational cue phrase present; surfaced as notification";

/// Minimum confidence after the overlay fires.
const NOTIFY_OVERLAY_CONFIDENCE: f32 = 0.7;

/// Cue phrases that mark an "ignorable" item as worth notifying about.
static NOTIFY_CUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bfyi\b",
        r"(?i)\breminder\b",
        r"(?i)\bout of office\b",
        r"(?i)\booo\b",
        r"(?i)\bmaintenance complete\b",
        r"(?i)\bpolicy update\b",
        r"(?i)\bheads up\b",
        r"(?i)\bno action needed\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static cue pattern"))
    .collect()
});

/// Apply the NOTIFY cue overlay to a raw signal.
///
/// Runs on the unvalidated label string so it sits between response parsing
/// and the enum guard.
pub fn apply_notify_overlay(mut signal: TriageSignal, item: &Item) -> TriageSignal {
    if !signal.label.trim().eq_ignore_ascii_case("IGNORE") {
        return signal;
    }

    let text = item.combined_text();
    if let Some(cue) = NOTIFY_CUES.iter().find(|r| r.is_match(&text)) {
        debug!(
            surface = %item.surface,
            cue = cue.as_str(),
            raw_confidence = signal.confidence,
            "NOTIFY cue overrides IGNORE"
        );
        signal.label = TriageLabel::Notify.as_str().to_string();
        signal.reason = NOTIFY_OVERLAY_REASON.to_string();
        signal.confidence = signal.confidence.max(NOTIFY_OVERLAY_CONFIDENCE);
    }

    signal
}

/// Coerce a raw signal into a validated decision.
///
/// Out-of-enum labels become REVIEW with confidence 0 and a fixed reason.
pub fn validate_label(signal: TriageSignal) -> TriageDecision {
    match TriageLabel::parse(&signal.label) {
        Some(label) => TriageDecision {
            label,
            reason: signal.reason,
            confidence: signal.confidence.clamp(0.0, 1.0),
        },
        None => {
            debug!(raw_label = %signal.label, "Out-of-enum label coerced to REVIEW");
            TriageDecision::review_fallback(UNKNOWN_LABEL_REASON)
        }
    }
}

/// Full post-processing pass: overlay, then enum guard.
pub fn resolve(signal: TriageSignal, item: &Item) -> TriageDecision {
    validate_label(apply_notify_overlay(signal, item))
}
