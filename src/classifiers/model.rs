use crate::classifiers::classifier::Classifier;
use crate::classifiers::knn::KNearestNeighbors;
use crate::classifiers::probabilities::Probabilities;
use crate::classifiers::svc::SupportVectorClassifier;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};

/// The concrete classifiers a run can be configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "state", rename_all = "kebab-case")]
pub enum Model {
    Svm(SupportVectorClassifier),
    Knn(KNearestNeighbors),
}

impl Classifier for Model {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        match self {
            Model::Svm(m) => m.fit(features, labels),
            Model::Knn(m) => m.fit(features, labels),
        }
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        match self {
            Model::Svm(m) => m.predict(features),
            Model::Knn(m) => m.predict(features),
        }
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        match self {
            Model::Svm(m) => m.predict_probabilities(features),
            Model::Knn(m) => m.predict_probabilities(features),
        }
    }

    fn classes(&self) -> &[String] {
        match self {
            Model::Svm(m) => m.classes(),
            Model::Knn(m) => m.classes(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Model::Svm(m) => m.name(),
            Model::Knn(m) => m.name(),
        }
    }
}

impl From<SupportVectorClassifier> for Model {
    fn from(m: SupportVectorClassifier) -> Self {
        Model::Svm(m)
    }
}

impl From<KNearestNeighbors> for Model {
    fn from(m: KNearestNeighbors) -> Self {
        Model::Knn(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_variant() {
        let mut m: Model = KNearestNeighbors::new(1).unwrap().into();
        m.fit(&[vec![0.0], vec![1.0]], &["x".into(), "y".into()])
            .unwrap();
        assert_eq!(m.name(), "KNN1");
        assert_eq!(m.predict(&[vec![0.9]]).unwrap(), vec!["y"]);
        assert_eq!(m.classes().len(), 2);

        let m: Model = SupportVectorClassifier::rbf(1.0, None).unwrap().into();
        assert_eq!(m.name(), "SVM-rbf");
    }
}
