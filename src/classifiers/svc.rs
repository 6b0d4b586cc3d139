use crate::classifiers::classifier::{Classifier, check_fitted, check_training_set};
use crate::classifiers::matrix::{scale_gamma, to_records};
use crate::classifiers::probabilities::Probabilities;
use crate::core::dataset::distinct_labels;
use crate::core::error::{ActiveLearningError, Result};
use linfa::dataset::Pr;
use linfa::Dataset;
use linfa::traits::{Fit, Predict};
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum KernelOption {
    Linear,
    /// `gamma: None` resolves to `1 / (n_features * var(X))` at fit time.
    Rbf { gamma: Option<f64> },
}

/// C-support vector classifier backed by `linfa-svm`.
///
/// Multi-class problems are split one-vs-rest; with two classes a single
/// machine separates `classes[1]` from `classes[0]`. Every machine is
/// Platt-calibrated, and per-class probabilities are normalized to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportVectorClassifier {
    c: f64,
    kernel: KernelOption,
    classes: Vec<String>,
    machines: Vec<Svm<f64, Pr>>,
}

impl SupportVectorClassifier {
    pub fn new(c: f64, kernel: KernelOption) -> Result<Self> {
        if !(c > 0.0 && c.is_finite()) {
            return Err(ActiveLearningError::configuration(format!(
                "SVM regularization C must be positive, got {c}"
            )));
        }
        if let KernelOption::Rbf { gamma: Some(g) } = kernel {
            if !(g > 0.0 && g.is_finite()) {
                return Err(ActiveLearningError::configuration(format!(
                    "RBF gamma must be positive, got {g}"
                )));
            }
        }
        Ok(Self {
            c,
            kernel,
            classes: Vec::new(),
            machines: Vec::new(),
        })
    }

    pub fn linear(c: f64) -> Result<Self> {
        Self::new(c, KernelOption::Linear)
    }

    pub fn rbf(c: f64, gamma: Option<f64>) -> Result<Self> {
        Self::new(c, KernelOption::Rbf { gamma })
    }

    /// `eps` is linfa's Gaussian width, `exp(-‖x - y‖² / eps)`; `None` means linear.
    fn train_machine(
        &self,
        records: &Array2<f64>,
        positive: Array1<bool>,
        eps: Option<f64>,
    ) -> Result<Svm<f64, Pr>> {
        let dataset = Dataset::new(records.clone(), positive);
        let params = Svm::<_, Pr>::params().pos_neg_weights(self.c, self.c);
        let machine = match eps {
            None => params.linear_kernel().fit(&dataset)?,
            Some(eps) => params.gaussian_kernel(eps).fit(&dataset)?,
        };
        Ok(machine)
    }
}

/// Calibrated probability of the positive side for every row.
fn positive_probabilities(machine: &Svm<f64, Pr>, records: &Array2<f64>) -> Vec<f64> {
    let scores: Array1<Pr> = machine.predict(records);
    scores.iter().map(|p| f64::from(**p)).collect()
}

impl Classifier for SupportVectorClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<()> {
        check_training_set(features, labels)?;
        let records = to_records(features)?;
        let classes = distinct_labels(labels);

        let eps = match self.kernel {
            KernelOption::Linear => None,
            KernelOption::Rbf { gamma } => {
                Some(1.0 / gamma.unwrap_or_else(|| scale_gamma(&records)))
            }
        };
        let targets: Vec<&String> = match classes.len() {
            1 => Vec::new(),
            2 => vec![&classes[1]],
            _ => classes.iter().collect(),
        };
        let machines = targets
            .into_iter()
            .map(|target| {
                let positive = Array1::from_iter(labels.iter().map(|l| l == target));
                self.train_machine(&records, positive, eps)
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("{} trained {} machine(s)", self.name(), machines.len());

        self.classes = classes;
        self.machines = machines;
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>> {
        Ok(self.predict_probabilities(features)?.most_probable())
    }

    fn predict_probabilities(&self, features: &[Vec<f64>]) -> Result<Probabilities> {
        check_fitted(&self.classes, self.name())?;
        if features.is_empty() {
            return Ok(Probabilities::new(self.classes.clone(), Vec::new()));
        }
        let records = to_records(features)?;

        let rows = match self.machines.as_slice() {
            [] => vec![vec![1.0]; features.len()],
            [machine] => positive_probabilities(machine, &records)
                .into_iter()
                .map(|p| vec![1.0 - p, p])
                .collect(),
            machines => {
                let per_class: Vec<Vec<f64>> = machines
                    .iter()
                    .map(|m| positive_probabilities(m, &records))
                    .collect();
                let k = machines.len();
                (0..features.len())
                    .map(|i| {
                        let raw: Vec<f64> = per_class.iter().map(|col| col[i]).collect();
                        let total: f64 = raw.iter().sum();
                        if total > 0.0 {
                            raw.into_iter().map(|p| p / total).collect()
                        } else {
                            vec![1.0 / k as f64; k]
                        }
                    })
                    .collect()
            }
        };
        Ok(Probabilities::new(self.classes.clone(), rows))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        match self.kernel {
            KernelOption::Linear => "SVM-linear",
            KernelOption::Rbf { .. } => "SVM-rbf",
        }
    }
}
