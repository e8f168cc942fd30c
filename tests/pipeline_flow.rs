//! End-to-end flows: routing, the review queue lifecycle, and the
//! edit-mining feedback loop reaching the next draft.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use echodraft::classify::Classifier;
use echodraft::error::{ClassifyError, GenerateError};
use echodraft::feedback::{line_diff, mine_and_save};
use echodraft::generate::Generator;
use echodraft::pipeline::{
    DraftParams, Item, RouteOutcome, RoutingEngine, Surface, TriageLabel, TriageSignal,
};
use echodraft::store::{FileKvStore, ReviewQueue, StyleRuleStore};

struct FixedClassifier {
    label: &'static str,
    confidence: f32,
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _item: &Item) -> Result<TriageSignal, ClassifyError> {
        Ok(TriageSignal {
            label: self.label.to_string(),
            reason: "fixed".into(),
            confidence: self.confidence,
        })
    }
}

/// Drafts a fixed cliché-ridden text and records the personalization handed in.
#[derive(Default)]
struct RecordingGenerator {
    personalizations: Mutex<Vec<String>>,
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn draft(
        &self,
        _params: &DraftParams,
        personalization: &str,
    ) -> Result<String, GenerateError> {
        self.personalizations
            .lock()
            .await
            .push(personalization.to_string());
        Ok("We should proceed.\nThe numbers look solid.".to_string())
    }

    async fn explain(&self) -> Result<String, GenerateError> {
        Ok("short sentences, direct opener".into())
    }

    async fn revise(&self, draft: &str, _feedback: &str) -> Result<String, GenerateError> {
        Ok(draft.to_string())
    }
}

struct World {
    _dir: tempfile::TempDir,
    engine: RoutingEngine,
    reviews: Arc<ReviewQueue>,
    rules: Arc<StyleRuleStore>,
    generator: Arc<RecordingGenerator>,
}

async fn world(label: &'static str, confidence: f32) -> World {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileKvStore::open(dir.path().join("review_queue"))
        .await
        .unwrap();
    let reviews = Arc::new(ReviewQueue::new(Arc::new(kv)));
    let rules = Arc::new(StyleRuleStore::new(dir.path().join("style_rules.json")));
    let generator = Arc::new(RecordingGenerator::default());
    let engine = RoutingEngine::new(
        Arc::new(FixedClassifier { label, confidence }),
        generator.clone(),
        reviews.clone(),
        rules.clone(),
    );
    World {
        _dir: dir,
        engine,
        reviews,
        rules,
        generator,
    }
}

fn item(surface: Surface, title: &str, content: &str) -> Item {
    Item {
        surface,
        title: title.into(),
        content: content.into(),
        metadata: serde_json::Map::new(),
        stale_days: 0,
    }
}

#[tokio::test]
async fn review_approve_flow() {
    let w = world("REVIEW", 0.9).await;
    let incoming = item(
        Surface::Email,
        "Contract question",
        "Is clause 4 negotiable?",
    );

    let result = w
        .engine
        .run(&incoming, DraftParams::new(""))
        .await
        .unwrap();
    let RouteOutcome::Review { id, status } = result.outcome else {
        panic!("expected review route");
    };
    assert!(status.contains(&id));
    assert!(status.contains("0.90"));

    // list() includes it, load() returns the exact payload.
    let listed = w.reviews.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, id);

    let task = w.reviews.load(&id).await.unwrap().unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Contract question");
    assert_eq!(task.content, "Is clause 4 negotiable?");
    assert_eq!(task.triage_label, TriageLabel::Review);

    // Approve terminates the task by deletion.
    assert!(w.reviews.delete(&id).await.unwrap());
    assert!(w.reviews.load(&id).await.unwrap().is_none());
    assert!(w.reviews.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn draft_with_explanation() {
    let w = world("DRAFT_EMAIL", 0.85).await;
    let incoming = item(Surface::Email, "Renewal", "Can you confirm the renewal?");

    let params = DraftParams::new("").with_explain(true);
    let result = w.engine.run(&incoming, params).await.unwrap();

    let RouteOutcome::Drafted { draft, explanation } = result.outcome else {
        panic!("expected draft route");
    };
    assert!(draft.contains("We should proceed."));
    assert_eq!(explanation.as_deref(), Some("short sentences, direct opener"));
    // No review entry for a confident draft.
    assert!(w.reviews.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn mined_edits_shape_the_next_draft() {
    let w = world("DRAFT_EMAIL", 0.9).await;
    let incoming = item(Surface::Email, "Update", "Status update please");

    // First draft: no rules yet, personalization renders as "None".
    let result = w
        .engine
        .run(&incoming, DraftParams::new(""))
        .await
        .unwrap();
    let RouteOutcome::Drafted { draft, .. } = result.outcome else {
        panic!("expected draft route");
    };
    assert_eq!(w.generator.personalizations.lock().await[0], "None");

    // A human edits the draft; the diff gets mined into persisted rules.
    let edited = "Let's proceed.\nThe numbers look solid.";
    let ops = line_diff(&draft, edited);
    let mined = mine_and_save(&w.rules, &ops).await.unwrap();
    assert_eq!(mined.replacements.len(), 1);

    // Second draft sees the substitution rule in its personalization text.
    w.engine
        .run(&incoming, DraftParams::new(""))
        .await
        .unwrap();
    let seen = w.generator.personalizations.lock().await;
    assert!(seen[1].contains("\"We should proceed.\" -> \"Let's proceed.\""));
}
