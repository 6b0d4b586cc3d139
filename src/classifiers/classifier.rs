use crate::classifiers::probabilities::Probabilities;
use crate::core::error::{ActiveLearningError, Result};

/// Trainable batch classifier over dense feature rows and string labels.
///
/// `fit` replaces whatever the model learned before. Models that cannot
/// estimate class probabilities keep the default `predict_probabilities`,
/// which reports an `UnsupportedOperation` error.
pub trait Classifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<()>;

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>>;

    fn predict_probabilities(&self, _features: &[Vec<f64>]) -> Result<Probabilities> {
        Err(ActiveLearningError::unsupported(format!(
            "{} does not produce class probabilities",
            self.name()
        )))
    }

    /// Sorted class labels seen by the last `fit`.
    fn classes(&self) -> &[String];

    fn name(&self) -> &str;
}

pub(crate) fn check_training_set(features: &[Vec<f64>], labels: &[String]) -> Result<()> {
    if features.is_empty() {
        return Err(ActiveLearningError::configuration(
            "cannot fit on an empty training set",
        ));
    }
    if features.len() != labels.len() {
        return Err(ActiveLearningError::configuration(format!(
            "{} training rows but {} labels",
            features.len(),
            labels.len()
        )));
    }
    Ok(())
}

pub(crate) fn check_fitted(classes: &[String], name: &str) -> Result<()> {
    if classes.is_empty() {
        return Err(ActiveLearningError::configuration(format!(
            "{name} used before fit"
        )));
    }
    Ok(())
}
