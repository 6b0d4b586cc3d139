use crate::classifiers::{Classifier, Probabilities};
use crate::core::error::Result;

/// Returns a fixed probability row per query row (cycling when the query is
/// longer than the script). `fit` only records the class list.
#[derive(Debug, Clone)]
pub struct ScriptedModel {
    rows: Vec<Vec<f64>>,
    classes: Vec<String>,
}

impl ScriptedModel {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        Self {
            rows,
            classes: (0..width).map(|j| format!("c{j}")).collect(),
        }
    }
}

impl Classifier for ScriptedModel {
    fn fit(&mut self, _features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        let seen = crate::core::dataset::distinct_labels(labels);
        if seen.len() == self.classes.len() {
            self.classes = seen;
        }
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        Ok(self.predict_probabilities(features)?.most_probable())
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        let rows = (0..features.len())
            .map(|i| self.rows[i % self.rows.len()].clone())
            .collect();
        Ok(Probabilities::new(self.classes.clone(), rows))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
