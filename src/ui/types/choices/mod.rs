mod experiment_config;
mod model_choice;
mod schema;
mod tagged_choice;

pub use experiment_config::{ExperimentConfig, NoveltyParams, UncertaintyParams};
pub use model_choice::*;
pub use schema::*;
pub use tagged_choice::TaggedChoice;
