use crate::classifiers::Classifier;
use crate::core::error::Result;

/// Predicts a single label for every row and has no probability output.
/// After `fit` the label is the training majority (smallest label on ties)
/// unless the model was built with [`LabelOnlyModel::constant`].
#[derive(Debug, Clone, Default)]
pub struct LabelOnlyModel {
    label: String,
    fixed: bool,
    classes: Vec<String>,
}

impl LabelOnlyModel {
    pub fn constant(label: &str) -> Self {
        Self {
            label: label.to_string(),
            fixed: true,
            classes: vec![label.to_string()],
        }
    }
}

impl Classifier for LabelOnlyModel {
    fn fit(&mut self, _features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        self.classes = crate::core::dataset::distinct_labels(labels);
        if !self.fixed {
            let mut best: Option<(&String, usize)> = None;
            for c in &self.classes {
                let n = labels.iter().filter(|l| *l == c).count();
                if best.is_none_or(|(_, m)| n > m) {
                    best = Some((c, n));
                }
            }
            self.label = best.map(|(c, _)| c.clone()).unwrap_or_default();
        }
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        Ok(vec![self.label.clone(); features.len()])
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        "LabelOnly"
    }
}
