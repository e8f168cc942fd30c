//! Offline triage evaluation: accuracy and per-label metrics over a set of
//! (expected, predicted) label pairs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::types::TriageLabel;

/// Precision/recall/F1 for one label.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LabelMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Aggregate triage quality report.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    /// Number of evaluated pairs.
    pub size: usize,
    pub accuracy: f64,
    pub per_label: BTreeMap<&'static str, LabelMetrics>,
    /// confusion[expected][predicted] = count.
    pub confusion: BTreeMap<&'static str, BTreeMap<&'static str, usize>>,
    pub pred_counts: BTreeMap<&'static str, usize>,
}

fn prf(tp: usize, fp: usize, fn_: usize) -> LabelMetrics {
    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };
    let recall = if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    LabelMetrics {
        precision,
        recall,
        f1,
    }
}

/// Score predictions against expectations.
pub fn evaluate(pairs: &[(TriageLabel, TriageLabel)]) -> TriageReport {
    let mut confusion: BTreeMap<&'static str, BTreeMap<&'static str, usize>> = BTreeMap::new();
    let mut pred_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut correct = 0usize;

    for (expected, predicted) in pairs {
        if expected == predicted {
            correct += 1;
        }
        *confusion
            .entry(expected.as_str())
            .or_default()
            .entry(predicted.as_str())
            .or_default() += 1;
        *pred_counts.entry(predicted.as_str()).or_default() += 1;
    }

    let mut per_label = BTreeMap::new();
    for label in TriageLabel::ALL {
        let name = label.as_str();
        let tp = confusion
            .get(name)
            .and_then(|row| row.get(name))
            .copied()
            .unwrap_or(0);
        let fp = TriageLabel::ALL
            .iter()
            .filter(|l| **l != label)
            .filter_map(|l| confusion.get(l.as_str()).and_then(|row| row.get(name)))
            .sum::<usize>();
        let fn_ = confusion
            .get(name)
            .map(|row| {
                row.iter()
                    .filter(|&(&pred, _)| pred != name)
                    .map(|(_, c)| c)
                    .sum::<usize>()
            })
            .unwrap_or(0);
        per_label.insert(name, prf(tp, fp, fn_));
    }

    let accuracy = if pairs.is_empty() {
        0.0
    } else {
        correct as f64 / pairs.len() as f64
    };

    TriageReport {
        size: pairs.len(),
        accuracy,
        per_label,
        confusion,
        pred_counts,
    }
}
