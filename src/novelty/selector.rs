use crate::classifiers::OneClassSvm;
use crate::core::error::{ActiveLearningError, Result};
use crate::core::pool::Pool;
use crate::novelty::affinity_propagation::AffinityPropagation;
use crate::novelty::detector::{DetectorFactory, NoveltyDetector};

#[derive(Debug, Clone, PartialEq)]
pub enum NoveltySelection {
    /// No unlabelled point lies outside every label's support.
    NoNovelty,
    /// Exemplars of the novel region, as unlabelled-relative indices.
    Exemplars { indices: Vec<usize>, novel: usize },
}

/// Picks structurally new points to annotate: one novelty detector per
/// labelled class marks the unlabelled points outside that class, points
/// outside *every* class are clustered, and the cluster exemplars are
/// returned.
pub struct NoveltySelector {
    clustering: AffinityPropagation,
    make_detector: DetectorFactory,
}

impl NoveltySelector {
    pub fn new(clustering: AffinityPropagation, make_detector: DetectorFactory) -> Self {
        Self {
            clustering,
            make_detector,
        }
    }

    /// Per-class one-class SVMs (RBF, gamma from the class's own spread).
    pub fn with_one_class_svm(damping: f64, preference: f64, nu: f64) -> Result<Self> {
        OneClassSvm::new(nu, None)?;
        let clustering = AffinityPropagation::new(damping, preference)?;
        Ok(Self::new(
            clustering,
            Box::new(move |_label: &str| -> Box<dyn NoveltyDetector> {
                Box::new(OneClassSvm::new(nu, None).unwrap_or_default())
            }),
        ))
    }

    /// `true` for unlabelled rows that every per-label detector flags.
    pub fn novel_mask(&self, pool: &Pool) -> Result<Vec<bool>> {
        let labelled = pool.labelled();
        let unlabelled = pool.unlabelled().features();

        let mut masks = Vec::new();
        for label in labelled.distinct_labels() {
            let mut detector = (self.make_detector)(&label);
            detector.fit(&labelled.features_with_label(&label))?;
            let mask = detector.is_novel(unlabelled)?;
            if mask.len() != unlabelled.len() {
                return Err(ActiveLearningError::configuration(format!(
                    "detector for '{label}' returned {} flags for {} rows",
                    mask.len(),
                    unlabelled.len()
                )));
            }
            log::debug!(
                "label '{label}': {} unlabelled points outside its support",
                mask.iter().filter(|&&b| b).count()
            );
            masks.push(mask);
        }
        Ok(combine_novelty_masks(&masks, unlabelled.len()))
    }

    pub fn select(&self, pool: &Pool) -> Result<NoveltySelection> {
        let mask = self.novel_mask(pool)?;
        let novel_rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect();
        log::info!("novelty detected: {}", novel_rows.len());

        if novel_rows.is_empty() {
            return Ok(NoveltySelection::NoNovelty);
        }

        let novel_x: Vec<Vec<f64>> = novel_rows
            .iter()
            .map(|&i| pool.unlabelled().features()[i].clone())
            .collect();
        let clusters = self.clustering.fit(&novel_x)?;
        let indices: Vec<usize> = clusters.exemplars.iter().map(|&e| novel_rows[e]).collect();
        log::info!(
            "representative samples chosen for annotation: {}",
            indices.len()
        );

        Ok(NoveltySelection::Exemplars {
            indices,
            novel: novel_rows.len(),
        })
    }
}

/// Logical AND across per-label masks. With no masks every row counts as
/// novel, since nothing is known yet.
pub fn combine_novelty_masks(masks: &[Vec<bool>], len: usize) -> Vec<bool> {
    (0..len)
        .map(|i| masks.iter().all(|m| m.get(i).copied().unwrap_or(false)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::testing::RadiusDetector;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn radius_selector(radius: f64) -> NoveltySelector {
        NoveltySelector::new(
            AffinityPropagation::new(0.75, -5.0).unwrap(),
            Box::new(move |_: &str| -> Box<dyn NoveltyDetector> {
                Box::new(RadiusDetector::new(radius))
            }),
        )
    }

    fn pool(features: Vec<Vec<f64>>, labels: &[&str], labelled: &[usize]) -> Pool {
        let ds = Dataset::new(features, labels.iter().map(|s| s.to_string()).collect()).unwrap();
        Pool::initialize(
            &ds,
            labelled.len(),
            Some(labelled),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap()
    }

    #[test]
    fn combine_requires_every_detector() {
        let a = vec![true, true, false, true];
        let b = vec![true, false, false, true];
        assert_eq!(
            combine_novelty_masks(&[a, b], 4),
            vec![true, false, false, true]
        );
        assert_eq!(combine_novelty_masks(&[], 2), vec![true, true]);
    }

    #[test]
    fn point_inside_one_class_is_not_novel() {
        // labelled: class a at 0, class b at 10
        // unlabelled: 10.2 (outside a, inside b), 0.1 (inside a), 50 (outside both)
        let p = pool(
            vec![vec![0.0], vec![10.0], vec![10.2], vec![0.1], vec![50.0]],
            &["a", "b", "b", "a", "c"],
            &[0, 1],
        );
        let mask = radius_selector(1.0).novel_mask(&p).unwrap();
        assert_eq!(mask, vec![false, false, true]);
    }

    #[test]
    fn select_maps_exemplars_to_unlabelled_positions() {
        let p = pool(
            vec![
                vec![0.0],
                vec![0.1],
                vec![30.0],
                vec![30.1],
                vec![0.2],
                vec![60.0],
                vec![60.2],
            ],
            &["a", "a", "x", "x", "a", "y", "y"],
            &[0, 1],
        );
        // unlabelled order: 30.0, 30.1, 0.2, 60.0, 60.2
        match radius_selector(1.0).select(&p).unwrap() {
            NoveltySelection::Exemplars { indices, novel } => {
                assert_eq!(novel, 4);
                assert_eq!(indices.len(), 2);
                for i in &indices {
                    assert!([0usize, 1, 3, 4].contains(i));
                }
                let xs: Vec<f64> = indices
                    .iter()
                    .map(|&i| p.unlabelled().features()[i][0])
                    .collect();
                assert!(xs.iter().any(|&v| v < 31.0));
                assert!(xs.iter().any(|&v| v > 59.0));
            }
            other => panic!("expected exemplars, got {other:?}"),
        }
    }

    #[test]
    fn select_reports_no_novelty() {
        let p = pool(
            vec![vec![0.0], vec![0.5], vec![0.3]],
            &["a", "a", "a"],
            &[0],
        );
        assert_eq!(
            radius_selector(1.0).select(&p).unwrap(),
            NoveltySelection::NoNovelty
        );
    }

    #[test]
    fn one_class_svm_selector_validates_parameters() {
        assert!(NoveltySelector::with_one_class_svm(0.75, -180.0, 0.5).is_ok());
        assert!(NoveltySelector::with_one_class_svm(0.2, -180.0, 0.5).is_err());
        assert!(NoveltySelector::with_one_class_svm(0.75, -180.0, 0.0).is_err());
    }
}
