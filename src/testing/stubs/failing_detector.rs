use crate::core::error::{ActiveLearningError, Result};
use crate::novelty::NoveltyDetector;

/// Detector whose `fit` always fails.
#[derive(Debug, Clone, Default)]
pub struct FailingDetector;

impl NoveltyDetector for FailingDetector {
    fn fit(&mut self, _support: &[Vec<f64>]) -> Result<()> {
        Err(ActiveLearningError::configuration("detector refused to fit"))
    }

    fn is_novel(&self, _features: &[Vec<f64>]) -> Result<Vec<bool>> {
        Err(ActiveLearningError::configuration("detector was never fitted"))
    }
}
