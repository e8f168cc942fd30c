//! Routing engine — the classification-then-action state machine.
//!
//! `Start → Triage → {Review | Draft | End}`, then `Draft → {Explain | End}`.
//! Start and End are the only initial/terminal states; there are no cycles.
//!
//! **Core invariant: a low-confidence classification is never trusted.** The
//! review check runs before anything else, so even a DRAFT_* verdict at low
//! confidence lands in the human-review queue instead of the generator.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::classify::Classifier;
use crate::error::{ClassifyError, Error};
use crate::generate::Generator;
use crate::pipeline::heuristics;
use crate::pipeline::types::{
    DraftParams, Item, PARSE_ERROR_REASON, PipelineResult, Route, RouteOutcome, Surface,
    TriageDecision, TriageLabel,
};
use crate::store::review::{ReviewQueue, ReviewTask};
use crate::store::rules::StyleRuleStore;

/// Decisions below this confidence always route to review.
const REVIEW_CONFIDENCE_FLOOR: f32 = 0.5;

/// Pick the next stage after triage.
///
/// The order of the checks is a deliberate safety policy, not an
/// optimization — the review check takes precedence over everything.
pub fn route_after_triage(decision: &TriageDecision) -> Route {
    if decision.label == TriageLabel::Review || decision.confidence < REVIEW_CONFIDENCE_FLOOR {
        return Route::Review;
    }
    if decision.label.is_draft() {
        return Route::Draft;
    }
    if matches!(decision.label, TriageLabel::Ignore | TriageLabel::Notify) {
        return Route::End;
    }
    // Unreachable under current label validation; kept so a future label
    // variant that misses the branches above fails safe.
    Route::Review
}

/// The orchestrator: consumes classifier output, decides the next stage, and
/// drives the generator and review queue accordingly.
///
/// Collaborators are injected at construction so tests can substitute fakes.
pub struct RoutingEngine {
    classifier: Arc<dyn Classifier>,
    generator: Arc<dyn Generator>,
    reviews: Arc<ReviewQueue>,
    rules: Arc<StyleRuleStore>,
}

impl RoutingEngine {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        generator: Arc<dyn Generator>,
        reviews: Arc<ReviewQueue>,
        rules: Arc<StyleRuleStore>,
    ) -> Self {
        Self {
            classifier,
            generator,
            reviews,
            rules,
        }
    }

    /// Run one item through the full pipeline.
    pub async fn run(&self, item: &Item, params: DraftParams) -> Result<PipelineResult, Error> {
        info!(
            surface = %item.surface,
            title = %item.title,
            "Routing incoming item"
        );

        // Triage. Parse failures degrade to a safe REVIEW decision; transport
        // failures are fatal for this invocation.
        let decision = match self.classifier.classify(item).await {
            Ok(signal) => heuristics::resolve(signal, item),
            Err(ClassifyError::Parse(e)) => {
                warn!(error = %e, "Unparseable triage response; substituting REVIEW");
                TriageDecision::review_fallback(PARSE_ERROR_REASON)
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            label = %decision.label,
            confidence = decision.confidence,
            reason = %decision.reason,
            "Triage decision"
        );

        // Topic defaults to the item title when the caller left it empty.
        let mut params = params;
        if params.topic.is_empty() {
            params.topic = item.title.clone();
        }

        let outcome = match route_after_triage(&decision) {
            Route::End => {
                debug!(label = %decision.label, "No further action");
                RouteOutcome::End
            }
            Route::Review => self.enter_review(item, &decision, &params).await?,
            Route::Draft => self.enter_draft(&params).await?,
        };

        Ok(PipelineResult { decision, outcome })
    }

    /// Enqueue a full task snapshot and build the status message.
    async fn enter_review(
        &self,
        item: &Item,
        decision: &TriageDecision,
        params: &DraftParams,
    ) -> Result<RouteOutcome, Error> {
        let task = ReviewTask::snapshot(item, decision, suggested_next(item, decision), params);
        let id = self.reviews.enqueue(task).await?;
        let status = format!(
            "queued for review: {id} (reason: {reason}, confidence: {confidence:.2})",
            reason = decision.reason,
            confidence = decision.confidence,
        );
        info!(id = %id, "Item routed to human review");
        Ok(RouteOutcome::Review { id, status })
    }

    /// Draft, then optionally explain. Generator errors propagate — no
    /// partial draft state is recorded.
    async fn enter_draft(&self, params: &DraftParams) -> Result<RouteOutcome, Error> {
        let personalization = self.rules.load().await.render();
        let draft = self
            .generator
            .draft(params, &personalization)
            .await
            .map_err(Error::Generate)?;

        let explanation = if params.explain {
            Some(self.generator.explain().await.map_err(Error::Generate)?)
        } else {
            None
        };

        info!(
            chars = draft.len(),
            explained = explanation.is_some(),
            "Draft produced"
        );
        Ok(RouteOutcome::Drafted { draft, explanation })
    }
}

/// Suggested next action for the reviewer: the triage verdict when it already
/// names a draft surface, else the draft action matching the item's surface.
fn suggested_next(item: &Item, decision: &TriageDecision) -> &'static str {
    if decision.label.is_draft() {
        return match decision.label {
            TriageLabel::DraftEmail => "draft_email",
            TriageLabel::DraftNotion => "draft_notion",
            _ => "draft_linkedin",
        };
    }
    match item.surface {
        Surface::Email => "draft_email",
        Surface::Notion => "draft_notion",
        Surface::Linkedin | Surface::Blog => "draft_linkedin",
    }
}
