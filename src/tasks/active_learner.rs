use crate::classifiers::Classifier;
use crate::core::dataset::Dataset;
use crate::core::error::{ActiveLearningError, Result};
use crate::core::pool::Pool;
use crate::evaluation::{IterationRecord, MetricsReporter, ResultsTable, TrainType};
use crate::novelty::{NoveltySelection, NoveltySelector};
use crate::preprocessing::{StandardScaler, write_scaled_csv};
use crate::sampling::SamplingStrategy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Where a run is. Stages only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Initialized,
    Preprocessed,
    Phase1Active,
    Phase2Active,
    Finalized,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Initialized => Some(Stage::Preprocessed),
            Stage::Preprocessed => Some(Stage::Phase1Active),
            Stage::Phase1Active => Some(Stage::Phase2Active),
            Stage::Phase2Active => Some(Stage::Finalized),
            Stage::Finalized => None,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Initialized => "initialized",
            Stage::Preprocessed => "preprocessed",
            Stage::Phase1Active => "phase 1",
            Stage::Phase2Active => "phase 2",
            Stage::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// Everything that changes while a run progresses. Each step consumes or
/// borrows a state and hands back a new one.
#[derive(Debug, Clone)]
pub struct RunState {
    stage: Stage,
    pool: Pool,
    results: ResultsTable,
}

impl RunState {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn results(&self) -> &ResultsTable {
        &self.results
    }

    fn advance(self, to: Stage) -> Result<Self> {
        if self.stage.next() != Some(to) {
            return Err(ActiveLearningError::configuration(format!(
                "cannot enter {to} from {}",
                self.stage
            )));
        }
        log::info!("entering {to}");
        Ok(Self { stage: to, ..self })
    }
}

/// Result of a finished run.
#[derive(Debug)]
pub struct Outcome<C> {
    pub model: C,
    pub pool: Pool,
    pub results: ResultsTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopParams {
    /// Size of the initial labelled pool.
    pub annotation_count: usize,
    pub initial_indices: Option<Vec<usize>>,
    pub novelty_max_iterations: usize,
    pub strategy: SamplingStrategy,
    pub batch_size: usize,
    pub uncertainty_max_iterations: usize,
    /// Hard cap on the labelled pool across both phases.
    pub max_total_samples: usize,
    pub seed: Option<u64>,
    pub scaled_data_path: Option<PathBuf>,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            annotation_count: 10,
            initial_indices: None,
            novelty_max_iterations: 10,
            strategy: SamplingStrategy::default(),
            batch_size: 10,
            uncertainty_max_iterations: 10,
            max_total_samples: 100,
            seed: None,
            scaled_data_path: None,
        }
    }
}

enum NoveltyStep {
    Continue,
    Done,
}

/// Two-phase active learning driver.
///
/// Phase 1 annotates exemplars of the region no labelled class covers,
/// phase 2 annotates batches chosen by a [`SamplingStrategy`]. The model is
/// retrained and evaluated after every annotation.
pub struct ActiveLearner<C: Classifier> {
    model: C,
    selector: NoveltySelector,
    reporter: MetricsReporter,
    params: LoopParams,
    rng: StdRng,
    progress_tx: Option<Sender<IterationRecord>>,
}

impl<C: Classifier> ActiveLearner<C> {
    pub fn new(
        model: C,
        selector: NoveltySelector,
        reporter: MetricsReporter,
        params: LoopParams,
    ) -> Result<Self> {
        if params.annotation_count == 0 {
            return Err(ActiveLearningError::configuration(
                "annotation_count must be > 0",
            ));
        }
        if params.batch_size == 0 {
            return Err(ActiveLearningError::configuration("batch_size must be > 0"));
        }
        if params.max_total_samples < params.annotation_count {
            return Err(ActiveLearningError::configuration(format!(
                "max_total_samples ({}) is below annotation_count ({})",
                params.max_total_samples, params.annotation_count
            )));
        }

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            model,
            selector,
            reporter,
            params,
            rng,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<IterationRecord>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn model(&self) -> &C {
        &self.model
    }

    pub fn params(&self) -> &LoopParams {
        &self.params
    }

    /// Runs every stage in order.
    pub fn run(mut self, dataset: &Dataset) -> Result<Outcome<C>> {
        let state = self.initialize(dataset)?;
        let state = self.preprocess(state)?;
        let state = self.run_novelty_phase(state)?;
        let state = self.run_uncertainty_phase(state)?;
        self.finalize(state)
    }

    pub fn initialize(&mut self, dataset: &Dataset) -> Result<RunState> {
        let pool = Pool::initialize(
            dataset,
            self.params.annotation_count,
            self.params.initial_indices.as_deref(),
            &mut self.rng,
        )?;
        log::info!(
            "pool initialized: {} labelled, {} unlabelled",
            pool.labelled().len(),
            pool.unlabelled().len()
        );
        Ok(RunState {
            stage: Stage::Initialized,
            pool,
            results: ResultsTable::default(),
        })
    }

    /// Standardizes both pools with parameters fitted on the unlabelled one.
    pub fn preprocess(&self, state: RunState) -> Result<RunState> {
        let state = state.advance(Stage::Preprocessed)?;

        let source = if state.pool.unlabelled().is_empty() {
            state.pool.labelled().features()
        } else {
            state.pool.unlabelled().features()
        };
        let scaler = StandardScaler;
        let params = scaler.fit(source)?;
        let pool = state.pool.map_features(|x| scaler.transform(x, &params))?;

        if let Some(path) = &self.params.scaled_data_path {
            if let Err(e) = write_scaled_csv(path, pool.unlabelled().features()) {
                log::warn!("could not write scaled data to {}: {e}", path.display());
            }
        }

        Ok(RunState { pool, ..state })
    }

    /// Novelty-driven annotation.
    ///
    /// Stops at the iteration cap, at the labelled-size cap, or when no
    /// unlabelled point is novel. A failure inside an iteration ends the
    /// phase without failing the run; records reported before it are kept.
    pub fn run_novelty_phase(&mut self, state: RunState) -> Result<RunState> {
        let mut state = state.advance(Stage::Phase1Active)?;

        for iteration in 0..self.params.novelty_max_iterations {
            if state.pool.labelled().len() >= self.params.max_total_samples {
                log::info!("labelled pool reached {}", self.params.max_total_samples);
                break;
            }
            log::info!("phase 1 iteration {}", iteration + 1);
            match self.novelty_iteration(&mut state) {
                Ok(NoveltyStep::Continue) => {}
                Ok(NoveltyStep::Done) => break,
                Err(e) => {
                    log::warn!("phase 1 aborted at iteration {}: {e}", iteration + 1);
                    break;
                }
            }
        }
        Ok(state)
    }

    /// One novelty round. Every finished evaluation lands in `state.results`
    /// before the next fallible step, so an error keeps completed records.
    fn novelty_iteration(&mut self, state: &mut RunState) -> Result<NoveltyStep> {
        let before = if state.results.is_empty() {
            TrainType::Initial
        } else {
            TrainType::AffinityPropagation
        };
        self.train_and_report(&state.pool, &mut state.results, before)?;

        let mut indices = match self.selector.select(&state.pool)? {
            NoveltySelection::NoNovelty => {
                log::info!("no novel points left");
                return Ok(NoveltyStep::Done);
            }
            NoveltySelection::Exemplars { indices, .. } if indices.is_empty() => {
                log::warn!("clustering produced no exemplars");
                return Ok(NoveltyStep::Done);
            }
            NoveltySelection::Exemplars { indices, .. } => indices,
        };

        let remaining = self.remaining_capacity(&state.pool);
        if indices.len() > remaining {
            log::info!(
                "keeping {remaining} of {} exemplars to respect max_total_samples",
                indices.len()
            );
            indices.truncate(remaining);
        }

        state.pool = state.pool.annotate(&indices)?;
        self.train_and_report(&state.pool, &mut state.results, TrainType::AffinityPropagation)?;
        Ok(NoveltyStep::Continue)
    }

    /// Strategy-driven annotation, one train/evaluate/select/annotate round
    /// per iteration, then a final train and evaluation.
    pub fn run_uncertainty_phase(&mut self, state: RunState) -> Result<RunState> {
        let mut state = state.advance(Stage::Phase2Active)?;
        let train_type = train_type_for(self.params.strategy);

        for round in 0..self.params.uncertainty_max_iterations {
            let remaining = self.remaining_capacity(&state.pool);
            if remaining == 0 {
                log::info!("labelled pool reached {}", self.params.max_total_samples);
                break;
            }
            if state.pool.unlabelled().is_empty() {
                log::info!("unlabelled pool exhausted");
                break;
            }
            log::info!("phase 2 round {} ({})", round + 1, self.params.strategy);

            self.train_and_report(&state.pool, &mut state.results, train_type)?;

            let n = self
                .params
                .batch_size
                .min(remaining)
                .min(state.pool.unlabelled().len());
            let picked = self.params.strategy.select(
                &self.model,
                state.pool.unlabelled().features(),
                n,
                &mut self.rng,
            )?;
            state.pool = state.pool.annotate(&picked)?;
        }

        self.train_and_report(&state.pool, &mut state.results, train_type)?;
        Ok(state)
    }

    pub fn finalize(self, state: RunState) -> Result<Outcome<C>> {
        let state = state.advance(Stage::Finalized)?;
        if let Some(last) = state.results.latest() {
            log::info!("final: {last}");
        }
        Ok(Outcome {
            model: self.model,
            pool: state.pool,
            results: state.results,
        })
    }

    fn remaining_capacity(&self, pool: &Pool) -> usize {
        self.params
            .max_total_samples
            .saturating_sub(pool.labelled().len())
    }

    fn train_and_report(
        &mut self,
        pool: &Pool,
        results: &mut ResultsTable,
        train_type: TrainType,
    ) -> Result<()> {
        let labelled = pool.labelled();
        self.model.fit(labelled.features(), labelled.labels())?;
        self.reporter.report(results, &self.model, pool, train_type)?;

        if let (Some(tx), Some(last)) = (&self.progress_tx, results.latest()) {
            let _ = tx.send(last.clone());
        }
        Ok(())
    }
}

fn train_type_for(strategy: SamplingStrategy) -> TrainType {
    match strategy {
        SamplingStrategy::Bvsb => TrainType::Bvsb,
        SamplingStrategy::Entropy => TrainType::Entropy,
        SamplingStrategy::Random => TrainType::Random,
    }
}
