use crate::classifiers::Classifier;
use crate::core::error::{ActiveLearningError, Result};
use crate::core::pool::Pool;
use crate::evaluation::metrics::{accuracy, weighted_f1};
use crate::evaluation::{IterationRecord, ResultsTable, TableFormat, TrainType};
use chrono::Utc;
use std::path::PathBuf;

/// Evaluates the current model after each retrain and appends the outcome
/// to the run's [`ResultsTable`].
///
/// The unlabelled pool is the held-out set: test accuracy and weighted F1
/// are computed on it, train accuracy on the labelled pool. When an output
/// path is configured the whole table is rewritten after every append; write
/// failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct MetricsReporter {
    damping: f64,
    preference: f64,
    output: Option<(PathBuf, TableFormat)>,
}

impl MetricsReporter {
    pub fn new(damping: f64, preference: f64) -> Self {
        Self {
            damping,
            preference,
            output: None,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, path: P, fmt: TableFormat) -> Self {
        self.output = Some((path.into(), fmt));
        self
    }

    /// Builds the record for `model` on the current `pool`.
    pub fn evaluate<C: Classifier + ?Sized>(
        &self,
        model: &C,
        pool: &Pool,
        train_type: TrainType,
    ) -> Result<IterationRecord> {
        let test = pool.unlabelled();
        let train = pool.labelled();

        let test_pred = predict_labels(model, test.features())?;
        let train_pred = predict_labels(model, train.features())?;

        Ok(IterationRecord {
            accuracy: accuracy(test.labels(), &test_pred),
            f1: weighted_f1(test.labels(), &test_pred),
            train_accuracy: accuracy(train.labels(), &train_pred),
            annotations: train.len(),
            damping: self.damping,
            preference: self.preference,
            train_type,
            classes: train.distinct_labels().len(),
            completed_at: Utc::now(),
        })
    }

    /// Evaluates, appends to `results` and persists the table.
    pub fn report<C: Classifier + ?Sized>(
        &self,
        results: &mut ResultsTable,
        model: &C,
        pool: &Pool,
        train_type: TrainType,
    ) -> Result<()> {
        let record = self.evaluate(model, pool, train_type)?;
        log::info!("{record}");
        results.push(record);
        self.persist(results);
        Ok(())
    }

    fn persist(&self, results: &ResultsTable) {
        if let Some((path, fmt)) = &self.output {
            if let Err(e) = results.export(path, *fmt) {
                log::warn!("could not write results to {}: {e}", path.display());
            }
        }
    }
}

/// Class predictions, falling back to the most probable class for models
/// that only expose probabilities.
fn predict_labels<C: Classifier + ?Sized>(model: &C, features: &[Vec<f64>]) -> Result<Vec<String>> {
    if features.is_empty() {
        return Ok(Vec::new());
    }
    match model.predict(features) {
        Ok(labels) => Ok(labels),
        Err(ActiveLearningError::UnsupportedOperation(reason)) => {
            log::debug!("predict unsupported ({reason}); using probabilities");
            Ok(model.predict_probabilities(features)?.most_probable())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::testing::{LabelOnlyModel, ProbabilityOnlyModel};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use tempfile::tempdir;

    fn pool() -> Pool {
        let ds = Dataset::new(
            vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
            vec!["a".into(), "b".into(), "a".into(), "a".into()],
        )
        .unwrap();
        Pool::initialize(&ds, 2, Some(&[0, 1]), &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn evaluate_scores_both_pools() {
        // predicts "a" everywhere
        let model = LabelOnlyModel::constant("a");
        let rep = MetricsReporter::new(0.75, -180.0);
        let r = rep.evaluate(&model, &pool(), TrainType::Initial).unwrap();
        assert_eq!(r.accuracy, 1.0);
        assert_eq!(r.f1, 1.0);
        assert_eq!(r.train_accuracy, 0.5);
        assert_eq!(r.annotations, 2);
        assert_eq!(r.classes, 2);
        assert_eq!(r.damping, 0.75);
        assert_eq!(r.preference, -180.0);
    }

    #[test]
    fn falls_back_to_probabilities_when_predict_unsupported() {
        let model = ProbabilityOnlyModel::new(vec!["a".into(), "b".into()], vec![0.9, 0.1]);
        let rep = MetricsReporter::new(0.75, -180.0);
        let r = rep.evaluate(&model, &pool(), TrainType::Bvsb).unwrap();
        assert_eq!(r.accuracy, 1.0);
    }

    #[test]
    fn report_appends_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rep = MetricsReporter::new(0.75, -180.0).with_output(&path, TableFormat::Csv);
        let model = LabelOnlyModel::constant("a");
        let mut table = ResultsTable::default();

        rep.report(&mut table, &model, &pool(), TrainType::Initial).unwrap();
        rep.report(&mut table, &model, &pool(), TrainType::Random).unwrap();

        assert_eq!(table.len(), 2);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn persistence_failure_keeps_in_memory_table() {
        let dir = tempdir().unwrap();
        // a directory where the file should be makes the write fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        let rep = MetricsReporter::new(0.75, -180.0).with_output(&path, TableFormat::Csv);
        let mut table = ResultsTable::default();
        rep.report(&mut table, &LabelOnlyModel::constant("a"), &pool(), TrainType::Initial)
            .unwrap();
        assert_eq!(table.len(), 1);
    }
}
