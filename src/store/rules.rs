//! Persisted style rules: banned phrases and substitutions mined from edits.
//!
//! The rule set is a single shared record. Concurrent mine-and-save races are
//! last-write-wins, an accepted limitation of this layer.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

/// A whole-line substitution mined from a human edit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Deduplicated bans and substitutions, kept in sorted order so rendering is
/// deterministic. The `tone` map is reserved for future knobs and is carried
/// through load/save untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRuleSet {
    #[serde(default)]
    pub bans: Vec<String>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub tone: serde_json::Map<String, serde_json::Value>,
}

impl StyleRuleSet {
    pub fn is_empty(&self) -> bool {
        self.bans.is_empty() && self.replacements.is_empty()
    }

    /// Union new bans into the set. Idempotent.
    pub fn merge_bans<I: IntoIterator<Item = String>>(&mut self, bans: I) {
        let mut set: BTreeSet<String> = self.bans.drain(..).collect();
        set.extend(bans);
        self.bans = set.into_iter().collect();
    }

    /// Union new substitution pairs into the set. Idempotent.
    pub fn merge_replacements<I: IntoIterator<Item = Replacement>>(&mut self, replacements: I) {
        let mut set: BTreeSet<Replacement> = self.replacements.drain(..).collect();
        set.extend(replacements);
        self.replacements = set.into_iter().collect();
    }

    /// Render a compact instruction string for the draft prompt.
    ///
    /// Returns the literal `"None"` when no rules exist.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if !self.bans.is_empty() {
            let quoted: Vec<String> = self.bans.iter().map(|b| format!("\"{b}\"")).collect();
            lines.push(format!("Avoid these phrases: {}", quoted.join("; ")));
        }
        if !self.replacements.is_empty() {
            let pairs: Vec<String> = self
                .replacements
                .iter()
                .map(|r| format!("\"{}\" -> \"{}\"", r.from, r.to))
                .collect();
            lines.push(format!("Make these substitutions: {}", pairs.join("; ")));
        }
        if lines.is_empty() {
            "None".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Single-record store for the style rule set.
pub struct StyleRuleStore {
    path: PathBuf,
}

impl StyleRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted rule set; absent or unreadable state degrades to
    /// the empty default.
    pub async fn load(&self) -> StyleRuleSet {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(rules) => rules,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Style rules are corrupt; using defaults"
                    );
                    StyleRuleSet::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StyleRuleSet::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read style rules; using defaults");
                StyleRuleSet::default()
            }
        }
    }

    /// Persist the rule set.
    pub async fn save(&self, rules: &StyleRuleSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(rules).map_err(|e| StoreError::Serialize {
            key: self.path.display().to_string(),
            source: e,
        })?;
        tokio::fs::write(&self.path, json).await?;
        debug!(
            path = %self.path.display(),
            bans = rules.bans.len(),
            replacements = rules.replacements.len(),
            "Style rules saved"
        );
        Ok(())
    }
}
