use crate::classifiers::matrix::squared_distance;
use crate::core::error::Result;
use crate::novelty::NoveltyDetector;

/// Flags a row as novel when it is farther than `radius` from every support
/// point. An empty support makes every row novel.
#[derive(Debug, Clone)]
pub struct RadiusDetector {
    radius: f64,
    support: Vec<Vec<f64>>,
}

impl RadiusDetector {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            support: Vec::new(),
        }
    }
}

impl NoveltyDetector for RadiusDetector {
    fn fit(&mut self, support: &[Vec<f64>]) -> Result<()> {
        self.support = support.to_vec();
        Ok(())
    }

    fn is_novel(&self, features: &[Vec<f64>]) -> Result<Vec<bool>> {
        let r2 = self.radius * self.radius;
        Ok(features
            .iter()
            .map(|x| self.support.iter().all(|s| squared_distance(s, x) > r2))
            .collect())
    }
}
