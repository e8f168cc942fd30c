//! Mines line-level edits into durable style rules.
//!
//! Two patterns matter: a deleted line that opens with a cliché cue becomes a
//! banned phrase, and a paired replace becomes a whole-line substitution.
//! Merging is a set union against the persisted rules, so mining the same
//! diff twice changes nothing the second time.

use tracing::info;

use crate::error::StoreError;
use crate::feedback::diff::EditOp;
use crate::store::rules::{Replacement, StyleRuleSet, StyleRuleStore};

/// Cliché openers. A deleted line starting with one of these (lower-cased,
/// trimmed) gets banned outright.
const CLICHE_CUES: [&str; 5] = [
    "in conclusion",
    "in summary",
    "we should",
    "i think",
    "it seems that",
];

/// Fold a diff's edit ops into a rule set.
pub fn mine_rules(ops: &[EditOp], rules: &mut StyleRuleSet) {
    let mut bans = Vec::new();
    let mut replacements = Vec::new();

    for op in ops {
        match op {
            EditOp::Delete(line) => {
                let trimmed = line.trim();
                let lowered = trimmed.to_lowercase();
                if CLICHE_CUES.iter().any(|cue| lowered.starts_with(cue)) {
                    bans.push(trimmed.to_string());
                }
            }
            EditOp::Replace { from, to } => {
                let from = from.trim();
                let to = to.trim();
                if !from.is_empty() && !to.is_empty() {
                    replacements.push(Replacement {
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
            }
            EditOp::Insert(_) => {}
        }
    }

    rules.merge_bans(bans);
    rules.merge_replacements(replacements);
}

/// Load the persisted rules, mine into them, and persist the merged result.
pub async fn mine_and_save(
    store: &StyleRuleStore,
    ops: &[EditOp],
) -> Result<StyleRuleSet, StoreError> {
    let mut rules = store.load().await;
    let (bans_before, repl_before) = (rules.bans.len(), rules.replacements.len());

    mine_rules(ops, &mut rules);
    store.save(&rules).await?;

    info!(
        new_bans = rules.bans.len() - bans_before,
        new_replacements = rules.replacements.len() - repl_before,
        "Mined edit feedback into style rules"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::diff::line_diff;

    #[test]
    fn deleted_cliche_line_becomes_ban() {
        let ops = vec![EditOp::Delete("  In conclusion, we nailed it.  ".into())];
        let mut rules = StyleRuleSet::default();
        mine_rules(&ops, &mut rules);
        // Original casing kept, whitespace trimmed.
        assert_eq!(rules.bans, vec!["In conclusion, we nailed it."]);
    }

    #[test]
    fn deleted_plain_line_is_not_banned() {
        let ops = vec![EditOp::Delete("The deadline is Friday.".into())];
        let mut rules = StyleRuleSet::default();
        mine_rules(&ops, &mut rules);
        assert!(rules.bans.is_empty());
    }

    #[test]
    fn replace_op_becomes_substitution() {
        let ops = line_diff("We should proceed.", "Let's proceed.");
        let mut rules = StyleRuleSet::default();
        mine_rules(&ops, &mut rules);
        assert_eq!(
            rules.replacements,
            vec![Replacement {
                from: "We should proceed.".into(),
                to: "Let's proceed.".into(),
            }]
        );
    }

    #[test]
    fn empty_sided_replace_is_skipped() {
        let ops = vec![EditOp::Replace {
            from: "   ".into(),
            to: "something".into(),
        }];
        let mut rules = StyleRuleSet::default();
        mine_rules(&ops, &mut rules);
        assert!(rules.replacements.is_empty());
    }

    #[test]
    fn inserts_are_ignored() {
        let ops = vec![EditOp::Insert("In conclusion, new stuff.".into())];
        let mut rules = StyleRuleSet::default();
        mine_rules(&ops, &mut rules);
        assert!(rules.is_empty());
    }

    #[test]
    fn mining_twice_is_idempotent() {
        let ops = line_diff(
            "In summary, we are done.\nWe should proceed.",
            "Done.\nLet's proceed.",
        );
        let mut once = StyleRuleSet::default();
        mine_rules(&ops, &mut once);

        let mut twice = once.clone();
        mine_rules(&ops, &mut twice);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn mine_and_save_merges_with_persisted_rules() {
        let dir = tempfile::tempdir().unwrap();
        let store = StyleRuleStore::new(dir.path().join("style_rules.json"));

        let mut seed = StyleRuleSet::default();
        seed.merge_bans(["I think this is fine.".to_string()]);
        store.save(&seed).await.unwrap();

        let ops = line_diff("We should proceed.", "Let's proceed.");
        let merged = mine_and_save(&store, &ops).await.unwrap();

        assert_eq!(merged.bans, vec!["I think this is fine."]);
        assert_eq!(merged.replacements.len(), 1);

        // And again: unchanged.
        let again = mine_and_save(&store, &ops).await.unwrap();
        assert_eq!(again, merged);
    }
}
