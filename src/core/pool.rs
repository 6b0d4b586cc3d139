use crate::core::dataset::{Dataset, distinct_labels};
use crate::core::error::{ActiveLearningError, Result};
use rand::Rng;
use std::collections::HashSet;

/// One side of the pool: feature rows, labels and the dataset row each entry
/// came from, all kept in lockstep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subset {
    rows: Vec<usize>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Subset {
    fn gather(dataset: &Dataset, rows: Vec<usize>) -> Self {
        let features = rows.iter().map(|&r| dataset.features()[r].clone()).collect();
        let labels = rows.iter().map(|&r| dataset.labels()[r].clone()).collect();
        Self {
            rows,
            features,
            labels,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Dataset row ids, aligned with `features()` and `labels()`.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn distinct_labels(&self) -> Vec<String> {
        distinct_labels(&self.labels)
    }

    /// Feature rows whose label equals `label`, in subset order.
    pub fn features_with_label(&self, label: &str) -> Vec<Vec<f64>> {
        self.features
            .iter()
            .zip(&self.labels)
            .filter(|(_, l)| l.as_str() == label)
            .map(|(x, _)| x.clone())
            .collect()
    }
}

/// Labelled / unlabelled partition of a [`Dataset`].
///
/// A `Pool` is a value: [`Pool::annotate`] and [`Pool::map_features`] return
/// an updated copy and leave `self` untouched, so a failed step never
/// leaves a half-moved pool behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    labelled: Subset,
    unlabelled: Subset,
    total: usize,
}

impl Pool {
    /// Partitions `dataset` into `count` labelled rows and the rest.
    ///
    /// Without `indices`, `count` distinct rows are drawn uniformly without
    /// replacement. With `indices`, they are used verbatim (and in order) as
    /// the labelled rows. Unlabelled rows keep dataset order.
    pub fn initialize<R: Rng + ?Sized>(
        dataset: &Dataset,
        count: usize,
        indices: Option<&[usize]>,
        rng: &mut R,
    ) -> Result<Self> {
        if count > dataset.len() {
            return Err(ActiveLearningError::configuration(format!(
                "annotation count {count} exceeds dataset size {}",
                dataset.len()
            )));
        }

        let picked: Vec<usize> = match indices {
            Some(given) => {
                if given.len() != count {
                    return Err(ActiveLearningError::configuration(format!(
                        "{} initial indices supplied for an annotation count of {count}",
                        given.len()
                    )));
                }
                let mut seen = HashSet::with_capacity(given.len());
                for &i in given {
                    if i >= dataset.len() {
                        return Err(ActiveLearningError::configuration(format!(
                            "initial index {i} out of range for {} rows",
                            dataset.len()
                        )));
                    }
                    if !seen.insert(i) {
                        return Err(ActiveLearningError::configuration(format!(
                            "initial index {i} given more than once"
                        )));
                    }
                }
                given.to_vec()
            }
            None => rand::seq::index::sample(rng, dataset.len(), count).into_vec(),
        };

        let chosen: HashSet<usize> = picked.iter().copied().collect();
        let rest: Vec<usize> = (0..dataset.len()).filter(|i| !chosen.contains(i)).collect();

        let pool = Self {
            labelled: Subset::gather(dataset, picked),
            unlabelled: Subset::gather(dataset, rest),
            total: dataset.len(),
        };
        pool.check_invariant()?;
        Ok(pool)
    }

    pub fn labelled(&self) -> &Subset {
        &self.labelled
    }

    pub fn unlabelled(&self) -> &Subset {
        &self.unlabelled
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Oracle annotation: moves rows out of the unlabelled subset.
    ///
    /// `indices` are positions in the *current* unlabelled arrays. The moved
    /// rows are appended to the labelled subset in the order given; the
    /// remaining unlabelled rows keep their relative order. Either every
    /// index is valid and all rows move, or an `Index` error is returned.
    pub fn annotate(&self, indices: &[usize]) -> Result<Self> {
        let n = self.unlabelled.len();
        let mut selected = vec![false; n];
        for &i in indices {
            if i >= n {
                return Err(ActiveLearningError::index(format!(
                    "index {i} out of range for {n} unlabelled rows"
                )));
            }
            if selected[i] {
                return Err(ActiveLearningError::index(format!("index {i} repeated")));
            }
            selected[i] = true;
        }

        let mut labelled = self.labelled.clone();
        for &i in indices {
            labelled.rows.push(self.unlabelled.rows[i]);
            labelled.features.push(self.unlabelled.features[i].clone());
            labelled.labels.push(self.unlabelled.labels[i].clone());
        }

        let mut unlabelled = Subset::default();
        for (i, keep) in selected.iter().map(|s| !s).enumerate() {
            if keep {
                unlabelled.rows.push(self.unlabelled.rows[i]);
                unlabelled.features.push(self.unlabelled.features[i].clone());
                unlabelled.labels.push(self.unlabelled.labels[i].clone());
            }
        }

        let pool = Self {
            labelled,
            unlabelled,
            total: self.total,
        };
        pool.check_invariant()?;
        Ok(pool)
    }

    /// Applies `f` to both feature matrices, keeping labels and row ids.
    pub fn map_features<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&[Vec<f64>]) -> Vec<Vec<f64>>,
    {
        let mut pool = self.clone();
        pool.labelled.features = f(&self.labelled.features);
        pool.unlabelled.features = f(&self.unlabelled.features);
        pool.check_invariant()?;
        Ok(pool)
    }

    /// Sizes add up, the subsets are row-disjoint, cover every row, and each
    /// subset's arrays are the same length.
    pub fn check_invariant(&self) -> Result<()> {
        let corrupted = || ActiveLearningError::PoolCorrupted {
            labelled: self.labelled.len(),
            unlabelled: self.unlabelled.len(),
            total: self.total,
        };

        if self.labelled.len() + self.unlabelled.len() != self.total {
            return Err(corrupted());
        }
        for s in [&self.labelled, &self.unlabelled] {
            if s.rows.len() != s.labels.len() || s.features.len() != s.labels.len() {
                return Err(corrupted());
            }
        }
        let mut seen = vec![false; self.total];
        for &r in self.labelled.rows.iter().chain(&self.unlabelled.rows) {
            if r >= self.total || seen[r] {
                return Err(corrupted());
            }
            seen[r] = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            (0..n).map(|i| vec![i as f64, -(i as f64)]).collect(),
            (0..n).map(|i| format!("c{}", i % 3)).collect(),
        )
        .unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn initialize_with_indices_uses_them_verbatim() {
        let ds = dataset(10);
        let pool = Pool::initialize(&ds, 3, Some(&[7, 2, 5]), &mut rng()).unwrap();
        assert_eq!(pool.labelled().rows(), &[7, 2, 5]);
        assert_eq!(pool.labelled().features()[0], vec![7.0, -7.0]);
        assert_eq!(pool.unlabelled().rows(), &[0, 1, 3, 4, 6, 8, 9]);
        assert_eq!(pool.labelled().len() + pool.unlabelled().len(), 10);
    }

    #[test]
    fn initialize_random_draws_distinct_rows() {
        let ds = dataset(50);
        let pool = Pool::initialize(&ds, 12, None, &mut rng()).unwrap();
        let mut rows = pool.labelled().rows().to_vec();
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 12);
        assert_eq!(pool.unlabelled().len(), 38);
        pool.check_invariant().unwrap();
    }

    #[test]
    fn initialize_rejects_count_mismatch_and_oversize() {
        let ds = dataset(5);
        let err = Pool::initialize(&ds, 3, Some(&[0, 1]), &mut rng()).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Configuration(_)));

        let err = Pool::initialize(&ds, 6, None, &mut rng()).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Configuration(_)));

        let err = Pool::initialize(&ds, 2, Some(&[1, 1]), &mut rng()).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Configuration(_)));
    }

    #[test]
    fn annotate_moves_rows_in_given_order() {
        let ds = dataset(8);
        let pool = Pool::initialize(&ds, 2, Some(&[0, 1]), &mut rng()).unwrap();
        // unlabelled rows are 2..8
        let before = pool.unlabelled().clone();
        let next = pool.annotate(&[4, 0, 2]).unwrap();

        assert_eq!(next.labelled().len(), 5);
        assert_eq!(next.unlabelled().len(), 3);
        assert_eq!(&next.labelled().features()[2..], &[
            before.features()[4].clone(),
            before.features()[0].clone(),
            before.features()[2].clone(),
        ]);
        assert_eq!(&next.labelled().labels()[2..], &[
            before.labels()[4].clone(),
            before.labels()[0].clone(),
            before.labels()[2].clone(),
        ]);
        assert_eq!(next.unlabelled().rows(), &[3, 5, 7]);
        assert_eq!(next.labelled().len() + next.unlabelled().len(), ds.len());
    }

    #[test]
    fn annotate_is_all_or_nothing() {
        let ds = dataset(6);
        let pool = Pool::initialize(&ds, 1, Some(&[0]), &mut rng()).unwrap();

        let err = pool.annotate(&[1, 9]).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Index(_)));

        let err = pool.annotate(&[2, 2]).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Index(_)));

        assert_eq!(pool.unlabelled().len(), 5);
        assert_eq!(pool.labelled().len(), 1);
    }

    #[test]
    fn annotate_empty_batch_is_identity() {
        let ds = dataset(4);
        let pool = Pool::initialize(&ds, 2, Some(&[3, 1]), &mut rng()).unwrap();
        assert_eq!(pool.annotate(&[]).unwrap(), pool);
    }

    #[test]
    fn map_features_keeps_labels_aligned() {
        let ds = dataset(4);
        let pool = Pool::initialize(&ds, 2, Some(&[3, 1]), &mut rng()).unwrap();
        let doubled = pool
            .map_features(|x| x.iter().map(|r| r.iter().map(|v| v * 2.0).collect()).collect())
            .unwrap();
        assert_eq!(doubled.labelled().features()[0], vec![6.0, -6.0]);
        assert_eq!(doubled.labelled().labels(), pool.labelled().labels());
    }

    #[test]
    fn features_with_label_filters() {
        let ds = dataset(6);
        let pool = Pool::initialize(&ds, 6, Some(&[0, 1, 2, 3, 4, 5]), &mut rng()).unwrap();
        let c0 = pool.labelled().features_with_label("c0");
        assert_eq!(c0, vec![vec![0.0, 0.0], vec![3.0, -3.0]]);
    }
}
