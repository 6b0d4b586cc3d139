use crate::classifiers::Model;
use crate::evaluation::MetricsReporter;
use crate::novelty::NoveltySelector;
use crate::tasks::ActiveLearner;
use crate::ui::types::build::{BuildError, build_model};
use crate::ui::types::choices::ExperimentConfig;

/// Validates `cfg` and assembles the learner. Results are rewritten to
/// `<results_dir>/<output_name>` after every round.
pub fn build_learner(
    cfg: &ExperimentConfig,
    output_name: &str,
) -> Result<ActiveLearner<Model>, BuildError> {
    cfg.validate()?;

    let model = build_model(cfg.model.clone())?;
    let selector = NoveltySelector::with_one_class_svm(
        cfg.novelty.damping,
        cfg.novelty.preference,
        cfg.novelty.nu,
    )?;
    let reporter = MetricsReporter::new(cfg.novelty.damping, cfg.novelty.preference)
        .with_output(cfg.results_dir.join(output_name), cfg.results_format);

    Ok(ActiveLearner::new(model, selector, reporter, cfg.loop_params())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::Classifier;
    use crate::core::error::ActiveLearningError;
    use crate::ui::types::choices::NoveltyParams;

    #[test]
    fn builds_from_defaults() {
        let cfg = ExperimentConfig::default();
        let learner = build_learner(&cfg, "out.csv").unwrap();
        assert_eq!(learner.params().annotation_count, 10);
        assert_eq!(learner.model().name(), "SVM-linear");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ExperimentConfig {
            novelty: NoveltyParams {
                damping: 0.2,
                ..NoveltyParams::default()
            },
            ..ExperimentConfig::default()
        };
        let err = build_learner(&cfg, "out.csv").err().unwrap();
        assert!(matches!(
            err,
            BuildError::Learning(ActiveLearningError::Configuration(_))
        ));
    }
}
