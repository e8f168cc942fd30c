//! Durable human-review queue.
//!
//! Each pending task is one record in the backing [`KvStore`], keyed by a
//! time-ordered identifier, so damage to one record never affects the rest.
//! Approving or rejecting a task terminates it by deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::pipeline::types::{DraftParams, Item, Surface, TriageDecision, TriageLabel};
use crate::store::kv::KvStore;

/// A persisted unit of work awaiting human decision.
///
/// The on-disk field set is stable for interoperability — a full snapshot of
/// the item, its triage decision, and the drafting parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTask {
    /// Identifier. Empty means "assign one on enqueue"; a carried identifier
    /// is reused so re-enqueue is idempotent.
    #[serde(default)]
    pub id: String,
    pub surface: Surface,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub triage_label: TriageLabel,
    pub triage_reason: String,
    pub triage_confidence: f32,
    /// Suggested next action for the reviewer.
    pub suggested_next: String,
    pub topic: String,
    pub style: String,
    pub words: u32,
    pub explain: bool,
}

impl ReviewTask {
    /// Snapshot an item, its decision, and drafting parameters into a task.
    pub fn snapshot(
        item: &Item,
        decision: &TriageDecision,
        suggested_next: impl Into<String>,
        params: &DraftParams,
    ) -> Self {
        Self {
            id: String::new(),
            surface: item.surface,
            title: item.title.clone(),
            content: item.content.clone(),
            metadata: item.metadata.clone(),
            triage_label: decision.label,
            triage_reason: decision.reason.clone(),
            triage_confidence: decision.confidence,
            suggested_next: suggested_next.into(),
            topic: params.topic.clone(),
            style: params.style.clone(),
            words: params.words,
            explain: params.explain,
        }
    }
}

/// Generate a fresh identifier: coarse timestamp prefix + random suffix.
/// Lexicographic order over these ids is also chronological.
fn generate_id() -> String {
    let ts = chrono::Utc::now().timestamp();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("rvw_{ts}_{}", &suffix[..6])
}

/// Durable queue of pending review tasks.
pub struct ReviewQueue {
    store: Arc<dyn KvStore>,
}

impl ReviewQueue {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Persist a task and return its identifier.
    ///
    /// A task that already carries an identifier keeps it.
    pub async fn enqueue(&self, mut task: ReviewTask) -> Result<String, StoreError> {
        if task.id.is_empty() {
            task.id = generate_id();
        }
        let id = task.id.clone();

        let json = serde_json::to_string_pretty(&task).map_err(|e| StoreError::Serialize {
            key: id.clone(),
            source: e,
        })?;
        self.store.put(&id, &json).await?;

        info!(
            id = %id,
            label = %task.triage_label,
            confidence = task.triage_confidence,
            "Review task enqueued"
        );
        Ok(id)
    }

    /// All pending tasks in identifier (chronological) order.
    ///
    /// Corrupt records are skipped, not fatal.
    pub async fn list(&self) -> Result<Vec<(String, ReviewTask)>, StoreError> {
        let mut tasks = Vec::new();
        for id in self.store.list().await? {
            let Some(json) = self.store.get(&id).await? else {
                continue;
            };
            match serde_json::from_str::<ReviewTask>(&json) {
                Ok(task) => tasks.push((id, task)),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping corrupt review record");
                }
            }
        }
        Ok(tasks)
    }

    /// Exact lookup. Absent or corrupt records read as `None`.
    pub async fn load(&self, id: &str) -> Result<Option<ReviewTask>, StoreError> {
        let Some(json) = self.store.get(id).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(task) => Ok(Some(task)),
            Err(e) => {
                warn!(id = %id, error = %e, "Review record is corrupt");
                Ok(None)
            }
        }
    }

    /// Remove a task. Returns whether a record existed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let existed = self.store.delete(id).await?;
        if existed {
            info!(id = %id, "Review task deleted");
        }
        Ok(existed)
    }
}
