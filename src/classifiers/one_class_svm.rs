use crate::classifiers::matrix::{scale_gamma, to_records};
use crate::core::error::{ActiveLearningError, Result};
use crate::novelty::NoveltyDetector;
use linfa::DatasetBase;
use linfa::prelude::Pr;
use linfa::traits::{Fit, Predict};
use linfa_svm::Svm;
use ndarray::Array1;

/// ν-one-class SVM with an RBF kernel, trained by `linfa-svm`.
///
/// A point is novel when it falls outside the learned support, i.e. the
/// decision value `Σ αᵢ K(xᵢ, x) − ρ` is negative.
#[derive(Debug, Clone)]
pub struct OneClassSvm {
    nu: f64,
    gamma: Option<f64>,
    model: Option<Svm<f64, bool>>,
}

impl OneClassSvm {
    pub fn new(nu: f64, gamma: Option<f64>) -> Result<Self> {
        if !(nu > 0.0 && nu <= 1.0) {
            return Err(ActiveLearningError::configuration(format!(
                "nu must be in (0, 1], got {nu}"
            )));
        }
        if let Some(g) = gamma {
            if !(g > 0.0 && g.is_finite()) {
                return Err(ActiveLearningError::configuration(format!(
                    "RBF gamma must be positive, got {g}"
                )));
            }
        }
        Ok(Self {
            nu,
            gamma,
            model: None,
        })
    }
}

impl Default for OneClassSvm {
    fn default() -> Self {
        Self {
            nu: 0.5,
            gamma: None,
            model: None,
        }
    }
}

impl NoveltyDetector for OneClassSvm {
    fn fit(&mut self, support: &[Vec<f64>]) -> Result<()> {
        if support.is_empty() {
            return Err(ActiveLearningError::configuration(
                "one-class SVM needs at least one support point",
            ));
        }
        let records = to_records(support)?;
        let gamma = self.gamma.unwrap_or_else(|| scale_gamma(&records));
        let dataset = DatasetBase::from(records);

        let model = Svm::<_, Pr>::params()
            .nu_weight(self.nu)
            .gaussian_kernel(1.0 / gamma)
            .fit(&dataset)?;
        self.model = Some(model);
        Ok(())
    }

    fn is_novel(&self, features: &[Vec<f64>]) -> Result<Vec<bool>> {
        let model = self.model.as_ref().ok_or_else(|| {
            ActiveLearningError::configuration("one-class SVM used before fit")
        })?;
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let inside: Array1<bool> = model.predict(&to_records(features)?);
        Ok(inside.iter().map(|&b| !b).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> Vec<Vec<f64>> {
        let mut x = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                x.push(vec![i as f64 * 0.1, j as f64 * 0.1]);
            }
        }
        x
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(OneClassSvm::new(0.0, None).is_err());
        assert!(OneClassSvm::new(1.5, None).is_err());
        assert!(OneClassSvm::new(0.5, Some(0.0)).is_err());
    }

    #[test]
    fn far_points_are_novel_and_centre_is_not() {
        let mut oc = OneClassSvm::default();
        oc.fit(&cluster()).unwrap();
        let flags = oc
            .is_novel(&[vec![0.2, 0.2], vec![10.0, 10.0], vec![-8.0, 3.0]])
            .unwrap();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn at_most_half_of_training_points_are_outside() {
        let x = cluster();
        let mut oc = OneClassSvm::new(0.2, None).unwrap();
        oc.fit(&x).unwrap();
        let outside = oc.is_novel(&x).unwrap().into_iter().filter(|&b| b).count();
        assert!(outside <= x.len() / 2, "outside={outside}");
    }

    #[test]
    fn unfitted_detector_errors() {
        let oc = OneClassSvm::default();
        assert!(oc.is_novel(&[vec![0.0]]).is_err());
    }

    #[test]
    fn empty_support_is_rejected() {
        let mut oc = OneClassSvm::default();
        assert!(oc.fit(&[]).is_err());
    }
}
