use crate::core::error::{ActiveLearningError, Result};
use crate::evaluation::TableFormat;
use crate::sampling::SamplingStrategy;
use crate::tasks::LoopParams;
use crate::ui::types::choices::ModelChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_damping() -> f64 {
    0.75
}
fn default_preference() -> f64 {
    -180.0
}
fn default_iterations() -> usize {
    10
}
fn default_nu() -> f64 {
    0.5
}
fn default_batch_size() -> usize {
    10
}
fn default_annotation_count() -> usize {
    10
}
fn default_max_total_samples() -> usize {
    100
}
fn default_label_column() -> String {
    "Label".into()
}
fn default_drop_columns() -> Vec<String> {
    vec!["Subject".into(), "Index".into()]
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("Results")
}
fn default_models_dir() -> PathBuf {
    PathBuf::from("Models")
}

/// Phase 1: per-class one-class SVMs and affinity propagation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NoveltyParams {
    #[serde(default = "default_damping")]
    #[schemars(
        title = "Damping",
        description = "Affinity propagation damping, in [0.5, 1)",
        range(min = 0.5, max = 1.0),
        default = "default_damping"
    )]
    pub damping: f64,

    #[serde(default = "default_preference")]
    #[schemars(
        title = "Preference",
        description = "Affinity propagation preference; more negative means fewer exemplars",
        default = "default_preference"
    )]
    pub preference: f64,

    #[serde(default = "default_iterations")]
    #[schemars(
        title = "Max Iterations",
        description = "Upper bound on novelty rounds",
        default = "default_iterations"
    )]
    pub max_iterations: usize,

    #[serde(default = "default_nu")]
    #[schemars(
        title = "Nu",
        description = "One-class SVM outlier fraction bound, in (0, 1]",
        range(min = 0.0, max = 1.0),
        default = "default_nu"
    )]
    pub nu: f64,
}

impl Default for NoveltyParams {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            preference: default_preference(),
            max_iterations: default_iterations(),
            nu: default_nu(),
        }
    }
}

/// Phase 2: strategy-driven batches.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UncertaintyParams {
    #[serde(default)]
    #[schemars(
        title = "Sampling Strategy",
        description = "How each batch is chosen"
    )]
    pub strategy: SamplingStrategy,

    #[serde(default = "default_batch_size")]
    #[schemars(
        title = "Batch Size",
        description = "Rows annotated per round",
        range(min = 1),
        default = "default_batch_size"
    )]
    pub batch_size: usize,

    #[serde(default = "default_iterations")]
    #[schemars(
        title = "Max Iterations",
        description = "Upper bound on sampling rounds",
        default = "default_iterations"
    )]
    pub max_iterations: usize,
}

impl Default for UncertaintyParams {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::default(),
            batch_size: default_batch_size(),
            max_iterations: default_iterations(),
        }
    }
}

/// One experiment, as read from `--config` or built by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExperimentConfig {
    #[schemars(
        with = "String",
        title = "Dataset",
        description = "Headered CSV with a label column",
        extend("format" = "path", "x-extensions" = ["csv"])
    )]
    pub data_path: PathBuf,

    #[serde(default = "default_label_column")]
    #[schemars(
        title = "Label Column",
        description = "Name of the class column",
        default = "default_label_column"
    )]
    pub label_column: String,

    #[serde(default = "default_drop_columns")]
    #[schemars(skip)]
    pub drop_columns: Vec<String>,

    #[serde(default = "default_annotation_count")]
    #[schemars(
        title = "Initial Annotations",
        description = "Rows labelled before the first round",
        range(min = 1),
        default = "default_annotation_count"
    )]
    pub annotation_count: usize,

    #[serde(default)]
    #[schemars(skip)]
    pub initial_indices: Option<Vec<usize>>,

    #[serde(default = "default_max_total_samples")]
    #[schemars(
        title = "Max Total Samples",
        description = "Cap on the labelled pool across both phases",
        range(min = 1),
        default = "default_max_total_samples"
    )]
    pub max_total_samples: usize,

    #[serde(default)]
    #[schemars(skip)]
    pub model: ModelChoice,

    #[serde(default)]
    #[schemars(skip)]
    pub novelty: NoveltyParams,

    #[serde(default)]
    #[schemars(skip)]
    pub uncertainty: UncertaintyParams,

    #[serde(default)]
    #[schemars(title = "Seed", description = "PRNG seed (None = from the OS)")]
    pub seed: Option<u64>,

    #[serde(default = "default_results_dir")]
    #[schemars(
        with = "String",
        title = "Results Directory",
        default = "default_results_dir"
    )]
    pub results_dir: PathBuf,

    #[serde(default = "default_models_dir")]
    #[schemars(
        with = "String",
        title = "Models Directory",
        default = "default_models_dir"
    )]
    pub models_dir: PathBuf,

    #[serde(default)]
    #[schemars(
        title = "Output Name",
        description = "Results file name (None = <model>_<n>.<ext>)"
    )]
    pub output_name: Option<String>,

    #[serde(default)]
    #[schemars(title = "Results Format")]
    pub results_format: TableFormat,

    #[serde(default)]
    #[schemars(skip)]
    pub scaled_data_path: Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            label_column: default_label_column(),
            drop_columns: default_drop_columns(),
            annotation_count: default_annotation_count(),
            initial_indices: None,
            max_total_samples: default_max_total_samples(),
            model: ModelChoice::default(),
            novelty: NoveltyParams::default(),
            uncertainty: UncertaintyParams::default(),
            seed: None,
            results_dir: default_results_dir(),
            models_dir: default_models_dir(),
            output_name: None,
            results_format: TableFormat::default(),
            scaled_data_path: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<()> {
        let n = &self.novelty;
        if !(0.5..1.0).contains(&n.damping) {
            return Err(ActiveLearningError::configuration(format!(
                "damping must be in [0.5, 1), got {}",
                n.damping
            )));
        }
        if !n.preference.is_finite() {
            return Err(ActiveLearningError::configuration("preference must be finite"));
        }
        if !(n.nu > 0.0 && n.nu <= 1.0) {
            return Err(ActiveLearningError::configuration(format!(
                "nu must be in (0, 1], got {}",
                n.nu
            )));
        }
        if self.annotation_count == 0 {
            return Err(ActiveLearningError::configuration(
                "annotation_count must be > 0",
            ));
        }
        if self.uncertainty.batch_size == 0 {
            return Err(ActiveLearningError::configuration("batch_size must be > 0"));
        }
        if self.max_total_samples < self.annotation_count {
            return Err(ActiveLearningError::configuration(format!(
                "max_total_samples ({}) is below annotation_count ({})",
                self.max_total_samples, self.annotation_count
            )));
        }
        let c = match &self.model {
            ModelChoice::SvmLinear(p) => Some(p.c),
            ModelChoice::SvmRbf(p) => Some(p.c),
            _ => None,
        };
        if let Some(c) = c.filter(|c| !(*c > 0.0)) {
            return Err(ActiveLearningError::configuration(format!(
                "SVM C must be > 0, got {c}"
            )));
        }
        Ok(())
    }

    pub fn loop_params(&self) -> LoopParams {
        LoopParams {
            annotation_count: self.annotation_count,
            initial_indices: self.initial_indices.clone(),
            novelty_max_iterations: self.novelty.max_iterations,
            strategy: self.uncertainty.strategy,
            batch_size: self.uncertainty.batch_size,
            uncertainty_max_iterations: self.uncertainty.max_iterations,
            max_total_samples: self.max_total_samples,
            seed: self.seed,
            scaled_data_path: self.scaled_data_path.clone(),
        }
    }

    /// `output_name`, or `<model>_<n>.<ext>` with `n` one past the number
    /// of entries already in `results_dir`.
    pub fn resolved_output_name(&self) -> String {
        if let Some(name) = &self.output_name {
            return name.clone();
        }
        let existing = fs::read_dir(&self.results_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        format!(
            "{}_{}.{}",
            self.model.key(),
            existing + 1,
            self.results_format.extension()
        )
    }
}
