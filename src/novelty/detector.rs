use crate::core::error::Result;

/// One-class boundary model: learns the support of a set of points and flags
/// query points that fall outside it.
pub trait NoveltyDetector {
    fn fit(&mut self, support: &[Vec<f64>]) -> Result<()>;

    /// `true` for every query row outside the learned support.
    fn is_novel(&self, features: &[Vec<f64>]) -> Result<Vec<bool>>;
}

/// Builds a fresh, unfitted detector for one label.
pub type DetectorFactory = Box<dyn Fn(&str) -> Box<dyn NoveltyDetector>>;
