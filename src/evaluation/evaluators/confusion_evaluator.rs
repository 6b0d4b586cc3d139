use crate::evaluation::{Measurement, PerformanceEvaluator};
use std::collections::BTreeMap;

/// Batch classification evaluator backed by a sparse confusion matrix.
///
/// Reports:
/// - `accuracy`: share of exact matches;
/// - `f1_weighted`, `precision_weighted`, `recall_weighted`: per-class scores
///   averaged with weights equal to each class's true support;
/// - `f1_macro`: unweighted mean of per-class F1.
///
/// The class set is the union of true and predicted labels. A class whose
/// precision or recall is undefined (0/0) scores 0. Every metric is NaN
/// while no result has been added.
#[derive(Debug, Default, Clone)]
pub struct ConfusionEvaluator {
    /// (truth, predicted) -> count
    cells: BTreeMap<(String, String), usize>,
    total: usize,
}

struct ClassScore {
    support: usize,
    precision: f64,
    recall: f64,
    f1: f64,
}

impl ConfusionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn class_scores(&self) -> Vec<ClassScore> {
        let mut true_count: BTreeMap<&str, usize> = BTreeMap::new();
        let mut pred_count: BTreeMap<&str, usize> = BTreeMap::new();
        let mut hits: BTreeMap<&str, usize> = BTreeMap::new();
        for ((t, p), &c) in &self.cells {
            let (t, p) = (t.as_str(), p.as_str());
            *true_count.entry(t).or_default() += c;
            *pred_count.entry(p).or_default() += c;
            if t == p {
                *hits.entry(t).or_default() += c;
            }
            true_count.entry(p).or_default();
            pred_count.entry(t).or_default();
        }

        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        true_count
            .iter()
            .map(|(class, &support)| {
                let tp = hits.get(class).copied().unwrap_or(0);
                let predicted = pred_count.get(class).copied().unwrap_or(0);
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassScore {
                    support,
                    precision,
                    recall,
                    f1,
                }
            })
            .collect()
    }
}

impl PerformanceEvaluator for ConfusionEvaluator {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn add_result(&mut self, truth: &str, predicted: &str) {
        *self
            .cells
            .entry((truth.to_string(), predicted.to_string()))
            .or_default() += 1;
        self.total += 1;
    }

    fn performance(&self) -> Vec<Measurement> {
        if self.total == 0 {
            return ["accuracy", "f1_weighted", "f1_macro", "precision_weighted", "recall_weighted"]
                .into_iter()
                .map(|n| Measurement::new(n, f64::NAN))
                .collect();
        }

        let correct: usize = self
            .cells
            .iter()
            .filter(|((t, p), _)| t == p)
            .map(|(_, &c)| c)
            .sum();
        let scores = self.class_scores();
        let n = self.total as f64;
        let weighted = |f: fn(&ClassScore) -> f64| {
            scores.iter().map(|s| f(s) * s.support as f64).sum::<f64>() / n
        };
        let macro_f1 = scores.iter().map(|s| s.f1).sum::<f64>() / scores.len() as f64;

        vec![
            Measurement::new("accuracy", correct as f64 / n),
            Measurement::new("f1_weighted", weighted(|s| s.f1)),
            Measurement::new("f1_macro", macro_f1),
            Measurement::new("precision_weighted", weighted(|s| s.precision)),
            Measurement::new("recall_weighted", weighted(|s| s.recall)),
        ]
    }
}
