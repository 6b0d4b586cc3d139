use crate::classifiers::{Classifier, Probabilities};
use crate::core::error::{ActiveLearningError, Result};

/// Answers every query with the same probability row; `predict` is
/// unsupported.
#[derive(Debug, Clone)]
pub struct ProbabilityOnlyModel {
    classes: Vec<String>,
    row: Vec<f64>,
}

impl ProbabilityOnlyModel {
    pub fn new(classes: Vec<String>, row: Vec<f64>) -> Self {
        Self { classes, row }
    }
}

impl Classifier for ProbabilityOnlyModel {
    fn fit(&mut self, _features: &[Vec<f64>], _labels: &[String]) -> Result<()> {
        Ok(())
    }

    fn predict(&self, _features: &[Vec<f64>]) -> Result<Vec<String>> {
        Err(ActiveLearningError::unsupported("ProbabilityOnly has no predict"))
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        Ok(Probabilities::new(
            self.classes.clone(),
            vec![self.row.clone(); features.len()],
        ))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        "ProbabilityOnly"
    }
}
