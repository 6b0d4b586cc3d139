use crate::classifiers::{Classifier, Probabilities};
use crate::core::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Read side of a [`FitSpyClassifier`].
#[derive(Clone, Debug, Default)]
pub struct FitCounter(Arc<AtomicUsize>);

impl FitCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Delegates to `inner` and counts calls to `fit`.
#[derive(Debug)]
pub struct FitSpyClassifier<C> {
    inner: C,
    fits: FitCounter,
}

impl<C: Classifier> FitSpyClassifier<C> {
    pub fn new(inner: C) -> (Self, FitCounter) {
        let fits = FitCounter::default();
        (
            Self {
                inner,
                fits: fits.clone(),
            },
            fits,
        )
    }
}

impl<C: Classifier> Classifier for FitSpyClassifier<C> {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        self.fits.0.fetch_add(1, Ordering::Relaxed);
        self.inner.fit(features, labels)
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        self.inner.predict(features)
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        self.inner.predict_probabilities(features)
    }

    fn classes(&self) -> &[String] {
        self.inner.classes()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
