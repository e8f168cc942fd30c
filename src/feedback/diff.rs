//! Line-level diff between an original draft and its human-edited version.

use similar::{Algorithm, DiffOp as LcsOp, capture_diff_slices};

/// One unit of a line-level edit alignment. Recomputed fresh on every diff
/// invocation and never persisted — only its mined consequences are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Delete(String),
    Insert(String),
    Replace { from: String, to: String },
}

/// Compute the edit-op sequence between two texts.
///
/// Uses an LCS alignment over lines. Within a replace span, deleted and
/// inserted lines are paired positionally up to the shorter span; leftover
/// lines degrade to bare deletes or inserts. The pairing is a heuristic — it
/// does not guarantee semantically matching lines when span lengths differ,
/// which is fine because downstream mining only uses paired ops for literal
/// whole-line substitutions.
pub fn line_diff(original: &str, edited: &str) -> Vec<EditOp> {
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = edited.lines().collect();

    let mut ops = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        match op {
            LcsOp::Equal { .. } => {}
            LcsOp::Delete {
                old_index, old_len, ..
            } => {
                for line in &old[old_index..old_index + old_len] {
                    ops.push(EditOp::Delete((*line).to_string()));
                }
            }
            LcsOp::Insert {
                new_index, new_len, ..
            } => {
                for line in &new[new_index..new_index + new_len] {
                    ops.push(EditOp::Insert((*line).to_string()));
                }
            }
            LcsOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let paired = old_len.min(new_len);
                for k in 0..paired {
                    ops.push(EditOp::Replace {
                        from: old[old_index + k].to_string(),
                        to: new[new_index + k].to_string(),
                    });
                }
                for line in &old[old_index + paired..old_index + old_len] {
                    ops.push(EditOp::Delete((*line).to_string()));
                }
                for line in &new[new_index + paired..new_index + new_len] {
                    ops.push(EditOp::Insert((*line).to_string()));
                }
            }
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_yield_no_ops() {
        assert!(line_diff("a\nb\nc", "a\nb\nc").is_empty());
    }

    #[test]
    fn single_line_change_is_one_replace() {
        let ops = line_diff("We should proceed.", "Let's proceed.");
        assert_eq!(
            ops,
            vec![EditOp::Replace {
                from: "We should proceed.".into(),
                to: "Let's proceed.".into(),
            }]
        );
    }

    #[test]
    fn pure_deletion_and_insertion() {
        let ops = line_diff("keep\ndrop me\nkeep2", "keep\nkeep2\nnew line");
        assert!(ops.contains(&EditOp::Delete("drop me".into())));
        assert!(ops.contains(&EditOp::Insert("new line".into())));
    }

    #[test]
    fn replace_span_pairs_positionally() {
        let original = "same\nold one\nold two\nsame2";
        let edited = "same\nnew one\nnew two\nsame2";
        let ops = line_diff(original, edited);
        assert_eq!(
            ops,
            vec![
                EditOp::Replace {
                    from: "old one".into(),
                    to: "new one".into(),
                },
                EditOp::Replace {
                    from: "old two".into(),
                    to: "new two".into(),
                },
            ]
        );
    }

    #[test]
    fn uneven_replace_span_degrades_leftovers() {
        // Two old lines collapse into one new line: one pair plus one delete.
        let original = "same\nold one\nold two\nsame2";
        let edited = "same\nmerged line\nsame2";
        let ops = line_diff(original, edited);

        let replaces = ops
            .iter()
            .filter(|o| matches!(o, EditOp::Replace { .. }))
            .count();
        let deletes = ops
            .iter()
            .filter(|o| matches!(o, EditOp::Delete(_)))
            .count();
        assert_eq!(replaces, 1);
        assert_eq!(deletes, 1);
    }

    #[test]
    fn empty_original_is_all_inserts() {
        let ops = line_diff("", "a\nb");
        assert_eq!(
            ops,
            vec![EditOp::Insert("a".into()), EditOp::Insert("b".into())]
        );
    }
}
