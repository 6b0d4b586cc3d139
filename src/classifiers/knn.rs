use crate::classifiers::classifier::{Classifier, check_fitted, check_training_set};
use crate::classifiers::matrix::to_records;
use crate::classifiers::probabilities::Probabilities;
use crate::core::dataset::distinct_labels;
use crate::core::error::{ActiveLearningError, Result};
use linfa_nn::distance::L2Dist;
use linfa_nn::{CommonNearestNeighbour, NearestNeighbour};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Uniform-vote k-nearest-neighbours over Euclidean distance, with neighbour
/// lookup through a `linfa-nn` ball tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNearestNeighbors {
    k: usize,
    classes: Vec<String>,
    features: Array2<f64>,
    /// Index into `classes` for every stored row.
    targets: Vec<usize>,
    name: String,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(ActiveLearningError::configuration("k must be at least 1"));
        }
        Ok(Self {
            k,
            classes: Vec::new(),
            features: Array2::zeros((0, 0)),
            targets: Vec::new(),
            name: format!("KNN{k}"),
        })
    }

    /// Neighbour votes per class, one row per query.
    fn votes(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<usize>>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let queries = to_records(features)?;
        let index = CommonNearestNeighbour::BallTree.from_batch(&self.features, L2Dist)?;
        let k = self.k.min(self.targets.len());

        queries
            .rows()
            .into_iter()
            .map(|query| -> Result<Vec<usize>> {
                let mut votes = vec![0usize; self.classes.len()];
                for (_, row) in index.k_nearest(query, k)? {
                    votes[self.targets[row]] += 1;
                }
                Ok(votes)
            })
            .collect()
    }
}

impl Classifier for KNearestNeighbors {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        check_training_set(features, labels)?;
        let classes = distinct_labels(labels);
        self.targets = labels
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or(0))
            .collect();
        self.features = to_records(features)?;
        self.classes = classes;
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        check_fitted(&self.classes, self.name())?;
        Ok(self
            .votes(features)?
            .into_iter()
            .map(|votes| {
                // strict comparison keeps the smallest class on ties
                let mut best = 0;
                for (c, &v) in votes.iter().enumerate() {
                    if v > votes[best] {
                        best = c;
                    }
                }
                self.classes[best].clone()
            })
            .collect())
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        check_fitted(&self.classes, self.name())?;
        let rows = self
            .votes(features)?
            .into_iter()
            .map(|votes| {
                let total = votes.iter().sum::<usize>().max(1) as f64;
                votes.into_iter().map(|v| v as f64 / total).collect()
            })
            .collect();
        Ok(Probabilities::new(self.classes.clone(), rows))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Vec<Vec<f64>>, Vec<String>) {
        let x = (0..6).map(|i| vec![i as f64]).collect();
        let y = ["a", "a", "a", "b", "b", "b"].iter().map(|s| s.to_string()).collect();
        (x, y)
    }

    #[test]
    fn zero_k_is_rejected() {
        assert!(matches!(
            KNearestNeighbors::new(0),
            Err(ActiveLearningError::Configuration(_))
        ));
    }

    #[test]
    fn predicts_by_majority_of_neighbours() {
        let (x, y) = line();
        let mut knn = KNearestNeighbors::new(3).unwrap();
        knn.fit(&x, &y).unwrap();
        assert_eq!(knn.predict(&[vec![0.2], vec![4.8]]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn probabilities_are_vote_fractions() {
        let (x, y) = line();
        let mut knn = KNearestNeighbors::new(2).unwrap();
        knn.fit(&x, &y).unwrap();
        let p = knn.predict_probabilities(&[vec![2.5], vec![0.0]]).unwrap();
        assert_eq!(p.rows()[0], vec![0.5, 0.5]);
        assert_eq!(p.rows()[1], vec![1.0, 0.0]);
    }

    #[test]
    fn probability_columns_follow_sorted_classes() {
        // labels arrive unsorted; columns must still match `classes()`
        let x = vec![vec![0.0], vec![0.1], vec![9.0], vec![9.1]];
        let y: Vec<String> = ["zeta", "zeta", "alpha", "alpha"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut knn = KNearestNeighbors::new(2).unwrap();
        knn.fit(&x, &y).unwrap();
        assert_eq!(knn.classes(), &["alpha".to_string(), "zeta".to_string()]);
        let p = knn.predict_probabilities(&[vec![0.05], vec![9.05]]).unwrap();
        assert_eq!(p.rows()[0], vec![0.0, 1.0]);
        assert_eq!(p.rows()[1], vec![1.0, 0.0]);
        assert_eq!(p.most_probable(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn tie_goes_to_smallest_class() {
        let (x, y) = line();
        let mut knn = KNearestNeighbors::new(2).unwrap();
        knn.fit(&x, &y).unwrap();
        assert_eq!(knn.predict(&[vec![2.5]]).unwrap(), vec!["a"]);
    }

    #[test]
    fn k_larger_than_training_set_uses_all_rows() {
        let (x, y) = line();
        let mut knn = KNearestNeighbors::new(10).unwrap();
        knn.fit(&x, &y).unwrap();
        let p = knn.predict_probabilities(&[vec![100.0]]).unwrap();
        assert_eq!(p.rows()[0], vec![0.5, 0.5]);
    }

    #[test]
    fn predict_before_fit_is_error() {
        let knn = KNearestNeighbors::new(3).unwrap();
        assert!(knn.predict(&[vec![1.0]]).is_err());
    }
}
