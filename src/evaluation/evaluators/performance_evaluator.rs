use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Accumulates (true label, predicted label) pairs and summarizes them.
pub trait PerformanceEvaluator {
    /// Clears every accumulated pair.
    fn reset(&mut self);

    /// Feeds one prediction together with its ground truth.
    fn add_result(&mut self, truth: &str, predicted: &str);

    /// Returns a snapshot of current metrics.
    fn performance(&self) -> Vec<Measurement>;

    fn add_results(&mut self, truth: &[String], predicted: &[String]) {
        for (t, p) in truth.iter().zip(predicted) {
            self.add_result(t, p);
        }
    }
}

pub trait PerformanceEvaluatorExt {
    /// Returns (name, Some(value)|None) for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
