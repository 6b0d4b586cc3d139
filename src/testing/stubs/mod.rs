pub mod failing_detector;
pub mod fit_spy;
pub mod label_only_model;
pub mod probability_only_model;
pub mod radius_detector;
pub mod scripted_model;

pub use failing_detector::FailingDetector;
pub use fit_spy::{FitCounter, FitSpyClassifier};
pub use label_only_model::LabelOnlyModel;
pub use probability_only_model::ProbabilityOnlyModel;
pub use radius_detector::RadiusDetector;
pub use scripted_model::ScriptedModel;
