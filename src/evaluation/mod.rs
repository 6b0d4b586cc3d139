mod evaluators;
mod measurement;
pub mod metrics;
mod record;
mod reporter;
mod results_table;

pub use evaluators::{ConfusionEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
pub use metrics::{accuracy, weighted_f1};
pub use record::{IterationRecord, TrainType};
pub use reporter::MetricsReporter;
pub use results_table::{ResultsTable, TableFormat};
